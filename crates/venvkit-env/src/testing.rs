//! In-memory [`PythonBackend`] for tests.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use venvkit_core::{Error, Result};

use crate::activation::Activation;
use crate::backend::PythonBackend;
use crate::store;

/// Pretends the listed `major.minor` versions are installed. `create_venv`
/// lays down `bin/activate`; `pip_install` records the files it was given.
pub struct FakePython {
    versions: Vec<String>,
    created: RefCell<Vec<PathBuf>>,
    installed: RefCell<Vec<PathBuf>>,
}

impl FakePython {
    pub fn with_versions(versions: &[&str]) -> Self {
        Self {
            versions: versions.iter().map(|v| v.to_string()).collect(),
            created: RefCell::new(Vec::new()),
            installed: RefCell::new(Vec::new()),
        }
    }

    pub fn created_count(&self) -> usize {
        self.created.borrow().len()
    }

    pub fn installed(&self) -> Vec<PathBuf> {
        self.installed.borrow().clone()
    }
}

impl PythonBackend for FakePython {
    fn resolve_interpreter(&self, major_minor: &str) -> Result<PathBuf> {
        if self.versions.iter().any(|v| v == major_minor) {
            Ok(PathBuf::from(format!("/usr/bin/python{}", major_minor)))
        } else {
            Err(Error::InterpreterNotFound(major_minor.to_string()))
        }
    }

    fn create_venv(&self, _interpreter: &Path, env_dir: &Path) -> Result<()> {
        let entry = store::entry_point(env_dir);
        fs::create_dir_all(entry.parent().unwrap_or(env_dir))?;
        fs::write(&entry, "# activate\n")?;
        self.created.borrow_mut().push(env_dir.to_path_buf());
        Ok(())
    }

    fn pip_install(&self, _env: &Activation, requirements: &Path) -> Result<()> {
        self.installed.borrow_mut().push(requirements.to_path_buf());
        Ok(())
    }
}
