//! On-disk layout of the centralized environment root.
//!
//! ```text
//! <home>/envs/<EnvId>/                       python -m venv output
//! <home>/requirements/<EnvId>/requirements.txt
//! <home>/requirements/<EnvId>/requirements-dev.txt
//! ```
//!
//! Dot-prefixed entries under `envs/` are internal tombstones and never listed.

use std::fs;
use std::path::{Path, PathBuf};

use venvkit_core::naming::EnvId;
use venvkit_core::Result;

const ENVS_SUBDIR: &str = "envs";
const REQUIREMENTS_SUBDIR: &str = "requirements";
const TOMBSTONE_SUFFIX: &str = ".deleting";

pub const RUNTIME_FILE: &str = "requirements.txt";
pub const DEV_FILE: &str = "requirements-dev.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvStatus {
    Absent,
    /// Directory exists but the activation script is missing.
    Incomplete,
    Ready,
}

impl EnvStatus {
    pub fn label(self) -> &'static str {
        match self {
            EnvStatus::Absent => "absent",
            EnvStatus::Incomplete => "incomplete",
            EnvStatus::Ready => "ready",
        }
    }
}

/// Directory-backed environment record.
#[derive(Debug, Clone)]
pub struct EnvRecord {
    pub id: EnvId,
    pub path: PathBuf,
    pub status: EnvStatus,
}

impl EnvRecord {
    pub fn exists(&self) -> bool {
        self.status != EnvStatus::Absent
    }

    pub fn is_complete(&self) -> bool {
        self.status == EnvStatus::Ready
    }
}

/// Centralized environment root.
#[derive(Debug, Clone)]
pub struct EnvStore {
    home: PathBuf,
}

impl EnvStore {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn envs_dir(&self) -> PathBuf {
        self.home.join(ENVS_SUBDIR)
    }

    pub fn env_dir(&self, id: &EnvId) -> PathBuf {
        self.envs_dir().join(id.as_str())
    }

    pub fn requirements_dir(&self, id: &EnvId) -> PathBuf {
        self.home.join(REQUIREMENTS_SUBDIR).join(id.as_str())
    }

    pub fn runtime_file(&self, id: &EnvId) -> PathBuf {
        self.requirements_dir(id).join(RUNTIME_FILE)
    }

    pub fn dev_file(&self, id: &EnvId) -> PathBuf {
        self.requirements_dir(id).join(DEV_FILE)
    }

    pub(crate) fn tombstone_dir(&self, id: &EnvId) -> PathBuf {
        self.envs_dir()
            .join(format!(".{}{}", id.as_str(), TOMBSTONE_SUFFIX))
    }

    pub fn status(&self, id: &EnvId) -> EnvStatus {
        let dir = self.env_dir(id);
        if !dir.is_dir() {
            EnvStatus::Absent
        } else if entry_point(&dir).exists() {
            EnvStatus::Ready
        } else {
            EnvStatus::Incomplete
        }
    }

    pub fn record(&self, id: &EnvId) -> EnvRecord {
        EnvRecord {
            id: id.clone(),
            path: self.env_dir(id),
            status: self.status(id),
        }
    }

    /// All environments sorted by identifier. A missing root is an empty list.
    pub fn list(&self) -> Result<Vec<EnvRecord>> {
        self.purge_tombstones();
        let envs_dir = self.envs_dir();
        if !envs_dir.exists() {
            return Ok(Vec::new());
        }
        let mut records = Vec::new();
        for entry in fs::read_dir(&envs_dir)?.flatten() {
            if !entry.path().is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            // Tombstones and foreign directories are skipped.
            let Ok(id) = EnvId::parse(&name) else {
                continue;
            };
            records.push(self.record(&id));
        }
        records.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(records)
    }

    /// Best-effort removal of tombstones left by an interrupted delete.
    pub(crate) fn purge_tombstones(&self) {
        let Ok(entries) = fs::read_dir(self.envs_dir()) else {
            return;
        };
        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') && name.ends_with(TOMBSTONE_SUFFIX) {
                if let Err(e) = fs::remove_dir_all(entry.path()) {
                    tracing::warn!(path = %entry.path().display(), "Failed to purge tombstone: {}", e);
                }
            }
        }
    }
}

/// Activation script whose presence marks a completed environment.
pub fn entry_point(env_dir: &Path) -> PathBuf {
    bin_dir(env_dir).join("activate")
}

/// Executables directory of a virtual environment.
pub fn bin_dir(env_dir: &Path) -> PathBuf {
    if cfg!(target_os = "windows") {
        env_dir.join("Scripts")
    } else {
        env_dir.join("bin")
    }
}

/// Interpreter inside a virtual environment.
pub fn python_executable(env_dir: &Path) -> PathBuf {
    if cfg!(target_os = "windows") {
        bin_dir(env_dir).join("python.exe")
    } else {
        bin_dir(env_dir).join("python")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> EnvId {
        EnvId::parse(s).unwrap()
    }

    #[test]
    fn test_status_transitions() {
        let tmp = tempfile::tempdir().unwrap();
        let store = EnvStore::new(tmp.path());
        let env = id("demo_python3.12");
        assert_eq!(store.status(&env), EnvStatus::Absent);

        fs::create_dir_all(store.env_dir(&env)).unwrap();
        assert_eq!(store.status(&env), EnvStatus::Incomplete);

        let ep = entry_point(&store.env_dir(&env));
        fs::create_dir_all(ep.parent().unwrap()).unwrap();
        fs::write(&ep, "").unwrap();
        assert_eq!(store.status(&env), EnvStatus::Ready);
    }

    #[test]
    fn test_list_missing_root_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let store = EnvStore::new(tmp.path().join("nowhere"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_list_sorted_and_skips_tombstones() {
        let tmp = tempfile::tempdir().unwrap();
        let store = EnvStore::new(tmp.path());
        for name in ["zeta_python3.11", "alpha_python3.12"] {
            fs::create_dir_all(store.env_dir(&id(name))).unwrap();
        }
        let tomb = store.tombstone_dir(&id("gone_python3.12"));
        fs::create_dir_all(&tomb).unwrap();

        let names: Vec<String> = store
            .list()
            .unwrap()
            .into_iter()
            .map(|r| r.id.to_string())
            .collect();
        assert_eq!(names, vec!["alpha_python3.12", "zeta_python3.11"]);
        assert!(!tomb.exists());
    }
}
