//! Release version format: strict `MAJOR.MINOR.PATCH`.

use regex::Regex;
use std::sync::OnceLock;

use venvkit_core::{Error, Result};

fn semver_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\.\d+\.\d+$").expect("static regex"))
}

/// Accept digits-only `MAJOR.MINOR.PATCH`; anything else is `InvalidVersionFormat`.
pub fn validate(version: &str) -> Result<()> {
    if semver_re().is_match(version) {
        Ok(())
    } else {
        Err(Error::InvalidVersionFormat(version.to_string()))
    }
}

/// Git tag for a release version.
pub fn tag_name(version: &str) -> String {
    format!("v{}", version)
}
