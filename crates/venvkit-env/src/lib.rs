//! Centralized Python virtual environments.
//!
//! Environments live under one root keyed by [`EnvId`]; callers get back
//! paths and an [`Activation`] value, never a mutated process environment.
//! Subprocess work (`venv`, `pip`) goes through [`PythonBackend`].

pub mod activation;
pub mod backend;
pub mod deps;
pub mod lifecycle;
pub mod store;

pub use activation::{Activation, Shell};
pub use backend::{HostPython, PythonBackend};
pub use lifecycle::Outcome;
pub use store::{EnvRecord, EnvStatus, EnvStore};
pub use venvkit_core::naming::EnvId;

#[cfg(test)]
pub(crate) mod testing;
