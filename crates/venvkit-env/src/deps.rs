//! Dependency sync: manifest -> requirements files -> pip.
//!
//! Both files are regenerated wholesale on every sync, never merged.
//! The development file pulls the runtime file in with `-r` and lists each
//! optional-dependency group under a `# <group>` label.

use std::fs;
use std::path::{Path, PathBuf};

use venvkit_core::manifest::Manifest;
use venvkit_core::naming::EnvId;
use venvkit_core::observability;
use venvkit_core::{Error, Result};

use crate::backend::PythonBackend;
use crate::lifecycle;
use crate::store::{EnvStore, RUNTIME_FILE};

/// Runtime and development requirement lists derived from a manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet {
    pub runtime: Vec<String>,
    pub groups: Vec<(String, Vec<String>)>,
}

impl DependencySet {
    pub fn from_manifest(manifest: &Manifest) -> Self {
        Self {
            runtime: manifest.dependencies.clone(),
            groups: manifest.optional_groups.clone(),
        }
    }

    /// One requirement per line, verbatim.
    pub fn render_runtime(&self) -> String {
        let mut out = String::new();
        for dep in &self.runtime {
            out.push_str(dep);
            out.push('\n');
        }
        out
    }

    pub fn render_dev(&self) -> String {
        let mut out = format!("-r {}\n", RUNTIME_FILE);
        for (group, deps) in &self.groups {
            out.push('\n');
            out.push_str(&format!("# {}\n", group));
            for dep in deps {
                out.push_str(dep);
                out.push('\n');
            }
        }
        out
    }
}

#[derive(Debug, Clone)]
pub struct SyncReport {
    pub runtime_file: PathBuf,
    pub dev_file: PathBuf,
    pub runtime_count: usize,
    pub group_count: usize,
}

/// Regenerate both requirements files for `id` from the manifest at `manifest_path`.
pub fn sync(store: &EnvStore, id: &EnvId, manifest_path: &Path) -> Result<SyncReport> {
    let manifest = Manifest::load(manifest_path)?;
    let set = DependencySet::from_manifest(&manifest);

    fs::create_dir_all(store.requirements_dir(id))?;
    let runtime_file = store.runtime_file(id);
    let dev_file = store.dev_file(id);
    fs::write(&runtime_file, set.render_runtime())?;
    fs::write(&dev_file, set.render_dev())?;

    observability::audit_deps_synced(id.as_str(), set.runtime.len(), set.groups.len());
    tracing::info!(
        env_id = %id,
        runtime = set.runtime.len(),
        groups = set.groups.len(),
        "Synced dependency lists"
    );
    Ok(SyncReport {
        runtime_file,
        dev_file,
        runtime_count: set.runtime.len(),
        group_count: set.groups.len(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallReport {
    /// False when the development file was missing and only runtime was installed.
    pub dev_installed: bool,
}

/// Install the runtime list, then the development list, into a ready environment.
pub fn install<B>(store: &EnvStore, backend: &B, id: &EnvId) -> Result<InstallReport>
where
    B: PythonBackend + ?Sized,
{
    let activation = lifecycle::activate(store, id)?;
    let runtime_file = store.runtime_file(id);
    if !runtime_file.exists() {
        return Err(Error::DependenciesNotSynced(id.to_string()));
    }
    backend.pip_install(&activation, &runtime_file)?;

    let dev_file = store.dev_file(id);
    if !dev_file.exists() {
        tracing::warn!(
            env_id = %id,
            "Development requirements missing ({}); installed runtime dependencies only",
            dev_file.display()
        );
        return Ok(InstallReport {
            dev_installed: false,
        });
    }
    backend.pip_install(&activation, &dev_file)?;
    Ok(InstallReport {
        dev_installed: true,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidateOutcome {
    /// Files match the manifest (or there is no manifest to compare against).
    UpToDate,
    /// A list file was missing; synced and installed.
    Synced,
    /// Files differed from the manifest; re-synced and re-installed.
    Resynced,
}

/// Make sure the requirement lists exist and match the manifest, syncing
/// and installing when they don't.
pub fn validate<B>(
    store: &EnvStore,
    backend: &B,
    id: &EnvId,
    manifest_path: &Path,
) -> Result<ValidateOutcome>
where
    B: PythonBackend + ?Sized,
{
    let runtime_file = store.runtime_file(id);
    let dev_file = store.dev_file(id);
    if !runtime_file.exists() || !dev_file.exists() {
        sync(store, id, manifest_path)?;
        install(store, backend, id)?;
        return Ok(ValidateOutcome::Synced);
    }

    let manifest = match Manifest::load(manifest_path) {
        Ok(m) => m,
        Err(Error::ManifestMissing(path)) => {
            tracing::warn!(
                "No manifest at {}; cannot compare dependency lists",
                path.display()
            );
            return Ok(ValidateOutcome::UpToDate);
        }
        Err(e) => return Err(e),
    };
    let expected = DependencySet::from_manifest(&manifest);
    let runtime_matches = fs::read_to_string(&runtime_file)? == expected.render_runtime();
    let dev_matches = fs::read_to_string(&dev_file)? == expected.render_dev();
    if runtime_matches && dev_matches {
        return Ok(ValidateOutcome::UpToDate);
    }

    tracing::info!(env_id = %id, "Dependency lists are stale; re-syncing");
    sync(store, id, manifest_path)?;
    install(store, backend, id)?;
    Ok(ValidateOutcome::Resynced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::create;
    use crate::testing::FakePython;

    const MANIFEST: &str = r#"
[project]
name = "demo"
version = "0.1.0"
dependencies = ["a>=1.0"]

[project.optional-dependencies]
dev = ["b>=2.0"]
"#;

    struct Fixture {
        _tmp: tempfile::TempDir,
        store: EnvStore,
        manifest: PathBuf,
        id: EnvId,
        backend: FakePython,
    }

    fn fixture(manifest: Option<&str>) -> Fixture {
        let tmp = tempfile::tempdir().unwrap();
        let store = EnvStore::new(tmp.path().join("home"));
        let project = tmp.path().join("demo");
        fs::create_dir_all(&project).unwrap();
        let manifest_path = project.join("pyproject.toml");
        if let Some(m) = manifest {
            fs::write(&manifest_path, m).unwrap();
        }
        Fixture {
            _tmp: tmp,
            store,
            manifest: manifest_path,
            id: EnvId::parse("demo_python3.12").unwrap(),
            backend: FakePython::with_versions(&["3.12"]),
        }
    }

    fn create_env(f: &Fixture) {
        create(&f.store, &f.backend, &f.id, "3.12", |_| Ok(true)).unwrap();
    }

    #[test]
    fn test_sync_writes_runtime_and_dev_lists() {
        let f = fixture(Some(MANIFEST));
        let report = sync(&f.store, &f.id, &f.manifest).unwrap();
        assert_eq!(report.runtime_count, 1);
        assert_eq!(report.group_count, 1);

        let runtime = fs::read_to_string(&report.runtime_file).unwrap();
        assert_eq!(runtime.lines().collect::<Vec<_>>(), vec!["a>=1.0"]);

        let dev = fs::read_to_string(&report.dev_file).unwrap();
        assert_eq!(dev, "-r requirements.txt\n\n# dev\nb>=2.0\n");
    }

    #[test]
    fn test_sync_is_idempotent() {
        let f = fixture(Some(MANIFEST));
        sync(&f.store, &f.id, &f.manifest).unwrap();
        let first = (
            fs::read(f.store.runtime_file(&f.id)).unwrap(),
            fs::read(f.store.dev_file(&f.id)).unwrap(),
        );
        sync(&f.store, &f.id, &f.manifest).unwrap();
        let second = (
            fs::read(f.store.runtime_file(&f.id)).unwrap(),
            fs::read(f.store.dev_file(&f.id)).unwrap(),
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_sync_overwrites_previous_content() {
        let f = fixture(Some(MANIFEST));
        fs::create_dir_all(f.store.requirements_dir(&f.id)).unwrap();
        fs::write(f.store.runtime_file(&f.id), "old==1\nother==2\n").unwrap();
        sync(&f.store, &f.id, &f.manifest).unwrap();
        assert_eq!(
            fs::read_to_string(f.store.runtime_file(&f.id)).unwrap(),
            "a>=1.0\n"
        );
    }

    #[test]
    fn test_sync_without_manifest() {
        let f = fixture(None);
        let err = sync(&f.store, &f.id, &f.manifest).unwrap_err();
        assert!(matches!(err, Error::ManifestMissing(_)));
    }

    #[test]
    fn test_render_dev_keeps_group_order() {
        let set = DependencySet {
            runtime: vec![],
            groups: vec![
                ("test".into(), vec!["pytest".into()]),
                ("docs".into(), vec!["sphinx".into(), "furo".into()]),
            ],
        };
        assert_eq!(
            set.render_dev(),
            "-r requirements.txt\n\n# test\npytest\n\n# docs\nsphinx\nfuro\n"
        );
        assert_eq!(set.render_runtime(), "");
    }

    #[test]
    fn test_install_runtime_then_dev() {
        let f = fixture(Some(MANIFEST));
        create_env(&f);
        sync(&f.store, &f.id, &f.manifest).unwrap();
        let report = install(&f.store, &f.backend, &f.id).unwrap();
        assert!(report.dev_installed);
        assert_eq!(
            f.backend.installed(),
            vec![f.store.runtime_file(&f.id), f.store.dev_file(&f.id)]
        );
    }

    #[test]
    fn test_install_without_runtime_file_fails() {
        let f = fixture(Some(MANIFEST));
        create_env(&f);
        fs::remove_file(f.store.runtime_file(&f.id)).unwrap();
        let err = install(&f.store, &f.backend, &f.id).unwrap_err();
        assert!(matches!(err, Error::DependenciesNotSynced(_)));
        assert!(f.backend.installed().is_empty());
    }

    #[test]
    fn test_install_without_dev_file_installs_runtime_only() {
        let f = fixture(Some(MANIFEST));
        create_env(&f);
        fs::remove_file(f.store.dev_file(&f.id)).unwrap();
        let report = install(&f.store, &f.backend, &f.id).unwrap();
        assert!(!report.dev_installed);
        assert_eq!(f.backend.installed(), vec![f.store.runtime_file(&f.id)]);
    }

    #[test]
    fn test_validate_missing_lists_syncs_and_installs() {
        let f = fixture(Some(MANIFEST));
        create_env(&f);
        fs::remove_dir_all(f.store.requirements_dir(&f.id)).unwrap();

        let outcome = validate(&f.store, &f.backend, &f.id, &f.manifest).unwrap();
        assert_eq!(outcome, ValidateOutcome::Synced);
        assert!(f.store.runtime_file(&f.id).exists());
        assert!(f.store.dev_file(&f.id).exists());
        assert_eq!(f.backend.installed().len(), 2);
    }

    #[test]
    fn test_validate_up_to_date_is_noop() {
        let f = fixture(Some(MANIFEST));
        create_env(&f);
        sync(&f.store, &f.id, &f.manifest).unwrap();
        let outcome = validate(&f.store, &f.backend, &f.id, &f.manifest).unwrap();
        assert_eq!(outcome, ValidateOutcome::UpToDate);
        assert!(f.backend.installed().is_empty());
    }

    #[test]
    fn test_validate_detects_manifest_drift() {
        let f = fixture(Some(MANIFEST));
        create_env(&f);
        sync(&f.store, &f.id, &f.manifest).unwrap();
        fs::write(&f.manifest, MANIFEST.replace("a>=1.0", "a>=1.1")).unwrap();

        let outcome = validate(&f.store, &f.backend, &f.id, &f.manifest).unwrap();
        assert_eq!(outcome, ValidateOutcome::Resynced);
        assert_eq!(
            fs::read_to_string(f.store.runtime_file(&f.id)).unwrap(),
            "a>=1.1\n"
        );
    }
}
