//! Configuration loader.

use crate::error::ConfigError;
use crate::schema::Config;

/// Configuration shipped inside the module.
const BUILTIN_CONFIG: &str = include_str!("../../../config/default.toml");

/// Configuration loader.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Load the built-in configuration.
    pub fn builtin() -> Result<Config, ConfigError> {
        Self::load_str(BUILTIN_CONFIG)
    }
}
