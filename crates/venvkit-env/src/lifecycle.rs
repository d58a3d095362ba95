//! Environment lifecycle: create, activate, list, delete.
//!
//! Destructive steps take a `confirm` callback; a `false` answer is a
//! cancellation, reported as [`Outcome::Cancelled`] rather than an error.

use std::fs;

use venvkit_core::naming::{self, EnvId};
use venvkit_core::observability;
use venvkit_core::{Error, Result};

use crate::activation::Activation;
use crate::backend::PythonBackend;
use crate::store::{EnvRecord, EnvStatus, EnvStore};

/// Result of an operation that may be declined by the operator.
#[derive(Debug)]
pub enum Outcome<T> {
    Done(T),
    Cancelled,
}

impl<T> Outcome<T> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled)
    }
}

/// Create (or recreate) the environment `id` for interpreter `version`.
///
/// An existing directory is only destroyed after `confirm` agrees. The
/// interpreter is resolved before anything is removed.
pub fn create<B, F>(
    store: &EnvStore,
    backend: &B,
    id: &EnvId,
    version: &str,
    confirm: F,
) -> Result<Outcome<EnvRecord>>
where
    B: PythonBackend + ?Sized,
    F: FnOnce(&EnvRecord) -> Result<bool>,
{
    store.purge_tombstones();
    let mm = naming::major_minor(version)?;
    let interpreter = backend.resolve_interpreter(&mm)?;

    let existing = store.record(id);
    if existing.exists() {
        if !confirm(&existing)? {
            return Ok(Outcome::Cancelled);
        }
        tracing::info!(env_id = %id, "Removing existing environment before recreate");
        fs::remove_dir_all(&existing.path)?;
    }

    fs::create_dir_all(store.envs_dir())?;
    let env_dir = store.env_dir(id);
    backend.create_venv(&interpreter, &env_dir)?;

    write_placeholders(store, id)?;
    observability::audit_env_created(id.as_str(), &interpreter.to_string_lossy());

    let record = store.record(id);
    if record.status != EnvStatus::Ready {
        return Err(Error::Incomplete(id.to_string()));
    }
    Ok(Outcome::Done(record))
}

/// Empty dependency lists with provenance comments. Overwrites whatever a
/// partial delete may have left behind.
fn write_placeholders(store: &EnvStore, id: &EnvId) -> Result<()> {
    fs::create_dir_all(store.requirements_dir(id))?;
    fs::write(
        store.runtime_file(id),
        format!(
            "# venvkit: runtime dependencies for {}\n# Populated from pyproject.toml by `venvkit sync`\n",
            id
        ),
    )?;
    fs::write(
        store.dev_file(id),
        format!(
            "# venvkit: development dependencies for {}\n-r {}\n",
            id,
            crate::store::RUNTIME_FILE
        ),
    )?;
    Ok(())
}

/// Activation for a ready environment.
pub fn activate(store: &EnvStore, id: &EnvId) -> Result<Activation> {
    let record = store.record(id);
    match record.status {
        EnvStatus::Absent => Err(Error::NotFound(id.to_string())),
        EnvStatus::Incomplete => Err(Error::Incomplete(id.to_string())),
        EnvStatus::Ready => Ok(Activation::new(id.clone(), record.path)),
    }
}

/// Every environment with its ready/incomplete status.
pub fn list(store: &EnvStore) -> Result<Vec<EnvRecord>> {
    store.list()
}

/// Delete the environment and its dependency lists as one unit.
///
/// The environment directory is renamed to a tombstone first, so it drops
/// out of `list` atomically; the dependency directory and then the tombstone
/// are removed afterwards.
pub fn delete<F>(store: &EnvStore, id: &EnvId, confirm: F) -> Result<Outcome<()>>
where
    F: FnOnce(&EnvRecord) -> Result<bool>,
{
    store.purge_tombstones();
    let record = store.record(id);
    if !record.exists() {
        return Err(Error::NotFound(id.to_string()));
    }
    if !confirm(&record)? {
        return Ok(Outcome::Cancelled);
    }

    let tombstone = store.tombstone_dir(id);
    if tombstone.exists() {
        fs::remove_dir_all(&tombstone)?;
    }
    fs::rename(&record.path, &tombstone)?;

    let requirements = store.requirements_dir(id);
    if requirements.exists() {
        fs::remove_dir_all(&requirements)?;
    }
    fs::remove_dir_all(&tombstone)?;

    observability::audit_env_deleted(id.as_str());
    tracing::info!(env_id = %id, "Deleted environment");
    Ok(Outcome::Done(()))
}
