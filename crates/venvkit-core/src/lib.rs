pub mod config;
pub mod error;
pub mod manifest;
pub mod naming;
pub mod observability;
pub mod project;

pub use error::{Error, Result};
