//! # vidctl Config
//!
//! Configuration management for vidctl: the named timing and size constants
//! and the list of hosts that get key remapping.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
