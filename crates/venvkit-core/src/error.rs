//! Error taxonomy shared by every venvkit crate.
//!
//! Every failure is fatal to the current invocation; the CLI prints the
//! message and exits non-zero.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Environment '{0}' not found")]
    NotFound(String),

    #[error("Environment '{0}' is incomplete (activation script missing); recreate it with `venvkit create`")]
    Incomplete(String),

    #[error("Python {0} interpreter not found on PATH")]
    InterpreterNotFound(String),

    #[error("Manifest not found: {}", .0.display())]
    ManifestMissing(PathBuf),

    #[error("Invalid manifest {}: {reason}", path.display())]
    ManifestInvalid { path: PathBuf, reason: String },

    #[error("Dependencies for '{0}' are not synced; run `venvkit sync` first")]
    DependenciesNotSynced(String),

    #[error("Invalid version '{0}': expected MAJOR.MINOR.PATCH (digits only)")]
    InvalidVersionFormat(String),

    #[error("Tag '{0}' already exists")]
    TagAlreadyExists(String),

    #[error("Checksum failed for {url}: {reason}")]
    ChecksumFailure { url: String, reason: String },

    #[error("Invalid environment identifier '{0}'")]
    InvalidIdentifier(String),

    #[error("Invalid Python version '{0}': expected at least MAJOR.MINOR")]
    InvalidPythonVersion(String),

    #[error("Field '{field}' not found in {}", path.display())]
    FieldNotFound { field: String, path: PathBuf },

    #[error("Release {version} is in progress; finish it or rerun with --reset")]
    ReleaseInProgress { version: String },

    #[error("`{program}` failed: {stderr}")]
    CommandFailed { program: String, stderr: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
