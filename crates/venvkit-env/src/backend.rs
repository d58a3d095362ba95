//! Host Python collaborators: interpreter lookup, `python -m venv`, `pip install`.

use std::path::{Path, PathBuf};
use std::process::Command;

use venvkit_core::{Error, Result};

use crate::activation::Activation;

/// Extension point for everything venvkit delegates to the host Python
/// toolchain. Tests substitute an in-memory implementation.
pub trait PythonBackend {
    /// Resolve an interpreter for `major_minor` (e.g. `"3.12"`).
    fn resolve_interpreter(&self, major_minor: &str) -> Result<PathBuf>;

    /// Create a virtual environment at `env_dir` using `interpreter`.
    fn create_venv(&self, interpreter: &Path, env_dir: &Path) -> Result<()>;

    /// Install a requirements file into an activated environment.
    fn pip_install(&self, env: &Activation, requirements: &Path) -> Result<()>;
}

/// Real backend: executables on `PATH`, subprocesses via `std::process`.
#[derive(Debug, Clone, Default)]
pub struct HostPython {
    /// Explicit interpreter (VENVKIT_PYTHON); skips lookup.
    pub pinned: Option<PathBuf>,
}

impl HostPython {
    pub fn new(pinned: Option<PathBuf>) -> Self {
        Self { pinned }
    }
}

impl PythonBackend for HostPython {
    fn resolve_interpreter(&self, major_minor: &str) -> Result<PathBuf> {
        if let Some(ref pinned) = self.pinned {
            return which::which(pinned)
                .map_err(|_| Error::InterpreterNotFound(pinned.display().to_string()));
        }
        if let Ok(p) = which::which(format!("python{}", major_minor)) {
            return Ok(p);
        }
        // Fall back to a generic python3 that happens to be the right version.
        if let Ok(p) = which::which("python3") {
            if interpreter_version(&p).as_deref() == Some(major_minor) {
                return Ok(p);
            }
        }
        Err(Error::InterpreterNotFound(major_minor.to_string()))
    }

    fn create_venv(&self, interpreter: &Path, env_dir: &Path) -> Result<()> {
        tracing::info!(
            interpreter = %interpreter.display(),
            env_dir = %env_dir.display(),
            "Creating virtual environment"
        );
        let mut cmd = Command::new(interpreter);
        cmd.arg("-m").arg("venv").arg(env_dir);
        run(cmd, &format!("{} -m venv", interpreter.display()))
    }

    fn pip_install(&self, env: &Activation, requirements: &Path) -> Result<()> {
        tracing::info!(
            env_id = %env.env_id,
            requirements = %requirements.display(),
            "Installing requirements"
        );
        let mut cmd = Command::new(env.python());
        cmd.args(["-m", "pip", "install", "--disable-pip-version-check", "-r"])
            .arg(requirements);
        env.apply(&mut cmd)?;
        // pip output streams straight to the terminal.
        let status = cmd.status()?;
        if !status.success() {
            return Err(Error::CommandFailed {
                program: "pip install".to_string(),
                stderr: format!("exit status {}", status),
            });
        }
        Ok(())
    }
}

/// `major.minor` reported by an interpreter, or None if it cannot be queried.
fn interpreter_version(python: &Path) -> Option<String> {
    let output = Command::new(python)
        .args([
            "-c",
            "import sys; print('%d.%d' % sys.version_info[:2])",
        ])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn run(mut cmd: Command, program: &str) -> Result<()> {
    let output = cmd.output()?;
    if !output.status.success() {
        return Err(Error::CommandFailed {
            program: program.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pinned_missing_interpreter_is_not_found() {
        let backend = HostPython::new(Some(PathBuf::from("/definitely/not/python9.9")));
        let err = backend.resolve_interpreter("9.9").unwrap_err();
        assert!(matches!(err, Error::InterpreterNotFound(_)));
    }

    #[test]
    fn test_unknown_version_is_not_found() {
        let backend = HostPython::default();
        let err = backend.resolve_interpreter("0.1").unwrap_err();
        assert!(matches!(err, Error::InterpreterNotFound(v) if v == "0.1"));
    }
}
