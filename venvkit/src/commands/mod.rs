//! Command handlers. User-facing progress goes to stderr; stdout carries only
//! output meant for pipes or `eval` (identifiers, listings, shell snippets).

pub mod deps;
pub mod env;
pub mod prompt;
pub mod release;

use venvkit_core::config::{PathsConfig, PromptConfig, PythonConfig};
use venvkit_env::{EnvStore, HostPython};

/// Resolved configuration shared by every command.
pub struct Context {
    pub store: EnvStore,
    pub python: PythonConfig,
    pub assume_yes: bool,
}

impl Context {
    pub fn from_env(yes_flag: bool) -> Self {
        Self {
            store: EnvStore::new(PathsConfig::from_env().home),
            python: PythonConfig::from_env(),
            assume_yes: yes_flag || PromptConfig::from_env().assume_yes,
        }
    }

    pub fn backend(&self) -> HostPython {
        HostPython::new(self.python.interpreter.clone())
    }
}
