//! Environment naming: `(project, python version) -> EnvId`.
//!
//! The identifier doubles as a directory name under the centralized root, so
//! it is restricted to `[A-Za-z0-9._-]` and may not start with a dot.

use std::fmt;

use crate::{Error, Result};

/// Canonical environment identifier, e.g. `myproj_python3.12`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnvId(String);

impl EnvId {
    /// Validate an identifier supplied verbatim (CLI argument, directory name).
    pub fn parse(raw: &str) -> Result<Self> {
        if is_safe_name(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(Error::InvalidIdentifier(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EnvId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EnvId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Build the identifier for a project directory name and interpreter version.
/// The patch component of `version` is discarded.
pub fn name(project: &str, version: &str) -> Result<EnvId> {
    let project = sanitize_project(project)?;
    let mm = major_minor(version)?;
    Ok(EnvId(format!("{}_python{}", project, mm)))
}

/// First two dot-separated components of a version string, both numeric.
pub fn major_minor(version: &str) -> Result<String> {
    let mut parts = version.trim().split('.');
    let major = parts.next().unwrap_or_default();
    let minor = parts.next().unwrap_or_default();
    let numeric = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    if !numeric(major) || !numeric(minor) {
        return Err(Error::InvalidPythonVersion(version.to_string()));
    }
    Ok(format!("{}.{}", major, minor))
}

/// Replace every character outside `[A-Za-z0-9._-]` with `_`.
/// Names that end up empty or start with `.` are rejected.
pub fn sanitize_project(project: &str) -> Result<String> {
    let cleaned: String = project
        .chars()
        .map(|c| if is_safe_char(c) { c } else { '_' })
        .collect();
    if is_safe_name(&cleaned) {
        Ok(cleaned)
    } else {
        Err(Error::InvalidIdentifier(project.to_string()))
    }
}

fn is_safe_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

fn is_safe_name(s: &str) -> bool {
    !s.is_empty() && !s.starts_with('.') && s.chars().all(is_safe_char)
}
