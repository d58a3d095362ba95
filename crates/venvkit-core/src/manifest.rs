//! `pyproject.toml` reader: runtime dependencies and optional-dependency groups.
//!
//! Group order follows the declaration order in the file (`toml` is built
//! with `preserve_order`).

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::{Error, Result};

/// Dependencies declared by a project manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub name: Option<String>,
    pub version: Option<String>,
    pub dependencies: Vec<String>,
    /// Optional-dependency groups in declaration order.
    pub optional_groups: Vec<(String, Vec<String>)>,
}

#[derive(Deserialize)]
struct RawManifest {
    #[serde(default)]
    project: Option<RawProject>,
}

#[derive(Deserialize)]
struct RawProject {
    name: Option<String>,
    version: Option<String>,
    #[serde(default)]
    dependencies: Vec<String>,
    #[serde(default, rename = "optional-dependencies")]
    optional_dependencies: Option<toml::Table>,
}

impl Manifest {
    /// Read and parse the manifest at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::ManifestMissing(path.to_path_buf()))
            }
            Err(e) => return Err(e.into()),
        };
        Self::parse(&content).map_err(|reason| Error::ManifestInvalid {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Parse manifest text. The error string names the offending entry.
    pub fn parse(content: &str) -> std::result::Result<Self, String> {
        let raw: RawManifest = toml::from_str(content).map_err(|e| e.message().to_string())?;
        let Some(project) = raw.project else {
            return Ok(Self::default());
        };

        let mut optional_groups = Vec::new();
        for (group, value) in project.optional_dependencies.unwrap_or_default() {
            let items = value
                .as_array()
                .ok_or_else(|| format!("optional-dependencies.{} must be an array", group))?;
            let deps = items
                .iter()
                .map(|v| {
                    v.as_str().map(str::to_string).ok_or_else(|| {
                        format!("optional-dependencies.{} must contain strings", group)
                    })
                })
                .collect::<std::result::Result<Vec<_>, _>>()?;
            optional_groups.push((group, deps));
        }

        Ok(Self {
            name: project.name,
            version: project.version,
            dependencies: project.dependencies,
            optional_groups,
        })
    }
}
