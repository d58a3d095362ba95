//! Resume record for an in-flight release.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use venvkit_core::Result;

use crate::workflow::ReleaseStep;

const STATE_FILE: &str = "venvkit-release.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseState {
    pub version: String,
    #[serde(default)]
    pub completed: Vec<ReleaseStep>,
    #[serde(default)]
    pub checksum: Option<String>,
}

impl ReleaseState {
    pub fn new(version: &str) -> Self {
        Self {
            version: version.to_string(),
            ..Default::default()
        }
    }

    pub fn is_done(&self, step: ReleaseStep) -> bool {
        self.completed.contains(&step)
    }

    pub fn mark_done(&mut self, step: ReleaseStep) {
        if !self.is_done(step) {
            self.completed.push(step);
        }
    }

    pub fn last_completed(&self) -> Option<ReleaseStep> {
        self.completed.iter().max().copied()
    }
}

#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<repo>/.git/venvkit-release.json`, or `<repo>/.venvkit-release.json`
    /// when `repo_dir` has no `.git` directory.
    pub fn default_for(repo_dir: &Path) -> Self {
        let git_dir = repo_dir.join(".git");
        if git_dir.is_dir() {
            Self::new(git_dir.join(STATE_FILE))
        } else {
            Self::new(repo_dir.join(format!(".{}", STATE_FILE)))
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<ReleaseState>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let state = serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(Some(state))
    }

    pub fn save(&self, state: &ReleaseState) -> Result<()> {
        let json = serde_json::to_string_pretty(state)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
