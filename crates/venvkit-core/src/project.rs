//! Project introspection: project name from the directory, interpreter
//! version from `.python-version`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::naming::{self, EnvId};
use crate::{Error, Result};

/// Per-project interpreter version marker.
pub const VERSION_MARKER: &str = ".python-version";

/// Project manifest read by dependency sync.
pub const MANIFEST_FILE: &str = "pyproject.toml";

/// A project rooted at a directory.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub name: String,
}

impl Project {
    /// Describe the project rooted at `root`; its name is the directory's final component.
    pub fn at(root: &Path) -> Result<Self> {
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| Error::InvalidIdentifier(root.display().to_string()))?;
        Ok(Self {
            root: root.to_path_buf(),
            name,
        })
    }

    /// The project in the current working directory.
    pub fn current() -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Self::at(&cwd)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    pub fn marker_path(&self) -> PathBuf {
        self.root.join(VERSION_MARKER)
    }

    /// Requested interpreter version. A missing marker is created with
    /// `default_version` and that value is returned.
    pub fn python_version(&self, default_version: &str) -> Result<String> {
        let marker = self.marker_path();
        match fs::read_to_string(&marker) {
            Ok(content) => {
                let version = content
                    .lines()
                    .map(str::trim)
                    .find(|l| !l.is_empty() && !l.starts_with('#'))
                    .ok_or_else(|| Error::InvalidPythonVersion(String::new()))?;
                Ok(version.to_string())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                fs::write(&marker, format!("{}\n", default_version))?;
                tracing::info!(
                    marker = %marker.display(),
                    version = %default_version,
                    "Created version marker with default"
                );
                Ok(default_version.to_string())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Identifier for this project at its requested interpreter version.
    pub fn env_id(&self, default_version: &str) -> Result<(EnvId, String)> {
        let version = self.python_version(default_version)?;
        let id = naming::name(&self.name, &version)?;
        Ok((id, version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project_dir(name: &str) -> (tempfile::TempDir, Project) {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join(name);
        fs::create_dir_all(&root).unwrap();
        let project = Project::at(&root).unwrap();
        (tmp, project)
    }

    #[test]
    fn test_missing_marker_is_created_with_default() {
        let (_tmp, project) = project_dir("demo");
        let version = project.python_version("3.12").unwrap();
        assert_eq!(version, "3.12");
        assert_eq!(fs::read_to_string(project.marker_path()).unwrap(), "3.12\n");
    }

    #[test]
    fn test_existing_marker_wins_over_default() {
        let (_tmp, project) = project_dir("demo");
        fs::write(project.marker_path(), "# pinned\n3.11.7\n").unwrap();
        assert_eq!(project.python_version("3.12").unwrap(), "3.11.7");
    }

    #[test]
    fn test_env_id_uses_directory_name() {
        let (_tmp, project) = project_dir("web app");
        fs::write(project.marker_path(), "3.10.4\n").unwrap();
        let (id, version) = project.env_id("3.12").unwrap();
        assert_eq!(id.as_str(), "web_app_python3.10");
        assert_eq!(version, "3.10.4");
    }

    #[test]
    fn test_empty_marker_is_rejected() {
        let (_tmp, project) = project_dir("demo");
        fs::write(project.marker_path(), "\n\n").unwrap();
        assert!(matches!(
            project.python_version("3.12"),
            Err(Error::InvalidPythonVersion(_))
        ));
    }
}
