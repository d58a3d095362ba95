//! Environment variable keys and alias chains.
//!
//! Primary variables use the `VENVKIT_*` prefix.

/// Centralized environment root
pub mod paths {
    pub const VENVKIT_HOME: &str = "VENVKIT_HOME";
    pub const HOME_ALIASES: &[&str] = &["VENVS_HOME"];
}

/// Interpreter selection
pub mod python {
    /// Version written to a fresh `.python-version` marker.
    pub const VENVKIT_DEFAULT_PYTHON: &str = "VENVKIT_DEFAULT_PYTHON";
    /// Explicit interpreter path; skips `PATH` lookup.
    pub const VENVKIT_PYTHON: &str = "VENVKIT_PYTHON";
}

/// Confirmation prompts
pub mod prompt {
    pub const VENVKIT_ASSUME_YES: &str = "VENVKIT_ASSUME_YES";
}

/// Release automation
pub mod release {
    pub const VENVKIT_FORMULA: &str = "VENVKIT_FORMULA";
    pub const VENVKIT_URL_TEMPLATE: &str = "VENVKIT_URL_TEMPLATE";
    pub const VENVKIT_GIT_REMOTE: &str = "VENVKIT_GIT_REMOTE";
}

/// Observability and logging
pub mod observability {
    pub const VENVKIT_QUIET: &str = "VENVKIT_QUIET";
    pub const VENVKIT_LOG_LEVEL: &str = "VENVKIT_LOG_LEVEL";
    pub const VENVKIT_LOG_JSON: &str = "VENVKIT_LOG_JSON";
    pub const VENVKIT_AUDIT_LOG: &str = "VENVKIT_AUDIT_LOG";
}
