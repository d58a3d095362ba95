//! Typed configuration grouped by concern, loaded from environment variables.

use super::env_keys::{observability as obv_keys, paths, prompt, python, release};
use super::loader::{env_bool, env_optional, env_or};
use std::path::PathBuf;

/// Default interpreter version written to a missing `.python-version`.
pub const DEFAULT_PYTHON_VERSION: &str = "3.12";

/// Directory name under `$HOME` when `VENVKIT_HOME` is unset.
const DEFAULT_HOME_DIR: &str = ".venvs";

/// Centralized environment root
#[derive(Debug, Clone)]
pub struct PathsConfig {
    pub home: PathBuf,
}

impl PathsConfig {
    pub fn from_env() -> Self {
        super::loader::load_dotenv();
        let home = env_optional(paths::VENVKIT_HOME, paths::HOME_ALIASES)
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(DEFAULT_HOME_DIR)
            });
        Self { home }
    }
}

/// Interpreter selection
#[derive(Debug, Clone)]
pub struct PythonConfig {
    pub default_version: String,
    pub interpreter: Option<PathBuf>,
}

impl PythonConfig {
    pub fn from_env() -> Self {
        super::loader::load_dotenv();
        Self {
            default_version: env_or(python::VENVKIT_DEFAULT_PYTHON, &[], || {
                DEFAULT_PYTHON_VERSION.to_string()
            }),
            interpreter: env_optional(python::VENVKIT_PYTHON, &[]).map(PathBuf::from),
        }
    }
}

/// Confirmation prompt behaviour
#[derive(Debug, Clone, Copy)]
pub struct PromptConfig {
    pub assume_yes: bool,
}

impl PromptConfig {
    pub fn from_env() -> Self {
        super::loader::load_dotenv();
        Self {
            assume_yes: env_bool(prompt::VENVKIT_ASSUME_YES, &[], false),
        }
    }
}

/// Release automation defaults; CLI flags take precedence.
#[derive(Debug, Clone)]
pub struct ReleaseConfig {
    pub formula: Option<PathBuf>,
    pub url_template: Option<String>,
    pub remote: String,
}

impl ReleaseConfig {
    pub fn from_env() -> Self {
        super::loader::load_dotenv();
        Self {
            formula: env_optional(release::VENVKIT_FORMULA, &[]).map(PathBuf::from),
            url_template: env_optional(release::VENVKIT_URL_TEMPLATE, &[]),
            remote: env_or(release::VENVKIT_GIT_REMOTE, &[], || "origin".to_string()),
        }
    }
}

/// Observability: quiet, log_level, log_json, audit_log
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub quiet: bool,
    pub log_level: String,
    pub log_json: bool,
    pub audit_log: Option<String>,
}

impl ObservabilityConfig {
    pub fn from_env() -> &'static Self {
        use std::sync::OnceLock;
        static CACHE: OnceLock<ObservabilityConfig> = OnceLock::new();
        CACHE.get_or_init(|| {
            super::loader::load_dotenv();
            Self {
                quiet: env_bool(obv_keys::VENVKIT_QUIET, &[], false),
                log_level: env_or(obv_keys::VENVKIT_LOG_LEVEL, &[], || "warn".to_string()),
                log_json: env_bool(obv_keys::VENVKIT_LOG_JSON, &[], false),
                audit_log: env_optional(obv_keys::VENVKIT_AUDIT_LOG, &[]),
            }
        })
    }
}
