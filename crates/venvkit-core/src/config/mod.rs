//! venvkit configuration layer
//!
//! All environment variable reads are centralized here; business code goes
//! through the typed structs instead of calling `std::env::var` directly.
//!
//! - `loader`: env_or, env_optional, env_bool helpers and the `.env` loader
//! - `schema`: PathsConfig, PythonConfig, PromptConfig, ReleaseConfig, ObservabilityConfig
//! - `env_keys`: key constants and their aliases

pub mod env_keys;
pub mod loader;
pub mod schema;

pub use loader::{env_bool, env_optional, env_or, load_dotenv, load_dotenv_from_dir};
pub use schema::{ObservabilityConfig, PathsConfig, PromptConfig, PythonConfig, ReleaseConfig};
