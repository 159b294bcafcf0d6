//! # vidctl
//!
//! Universal keyboard controls for the main video on any web page.
//!
//! Built as a WebAssembly module; when the browser instantiates it, the
//! module sets up console logging, reads its built-in configuration and
//! starts the controller once the document has loaded.

use tracing::warn;
use tracing_subscriber::EnvFilter;
use vidctl_config::{Config, ConfigError, ConfigLoader, ConfigValidator};

/// Log level used when the configured one cannot be parsed.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// The built-in configuration, or the defaults if it is unusable.
pub fn load_config() -> Config {
    checked(ConfigLoader::builtin())
}

/// Parse and validate `content`, falling back to the defaults.
pub fn config_from_toml(content: &str) -> Config {
    checked(ConfigLoader::load_str(content))
}

fn checked(parsed: Result<Config, ConfigError>) -> Config {
    let config = match parsed {
        Ok(config) => config,
        Err(e) => {
            warn!("Configuration unreadable, using defaults: {}", e);
            return Config::default();
        }
    };

    let result = ConfigValidator::validate(&config);
    for warning in &result.warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }
    if result.is_valid() {
        return config;
    }
    for error in &result.errors {
        warn!("Invalid config {}: {}", error.path, error.message);
    }
    warn!("Using default configuration");
    Config::default()
}

/// Filter for `level`, a tracing directive string such as `"debug"` or
/// `"info,vidctl_core=trace"`.
pub fn log_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

#[cfg(target_arch = "wasm32")]
mod web {
    use tracing::error;
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};
    use vidctl_config::ConfigLoader;
    use vidctl_page_web::{ConsoleMakeWriter, install_panic_hook, launch, when_loaded};
    use wasm_bindgen::prelude::*;

    fn init_tracing(level: &str) {
        let _ = tracing_subscriber::registry()
            .with(super::log_filter(level))
            .with(
                fmt::layer()
                    .with_writer(ConsoleMakeWriter::new())
                    .with_target(true)
                    .with_ansi(false)
                    .without_time(),
            )
            .try_init();
    }

    #[wasm_bindgen(start)]
    pub fn start() {
        install_panic_hook();

        let parsed = ConfigLoader::builtin();
        let level = parsed
            .as_ref()
            .map(|config| config.logging.level.clone())
            .unwrap_or_else(|_| super::DEFAULT_LOG_LEVEL.to_string());
        init_tracing(&level);
        let config = super::checked(parsed);

        let Some(window) = web_sys::window() else {
            error!("No window; controls not started");
            return;
        };
        let started = when_loaded(&window, move || {
            if let Err(e) = launch(config) {
                error!("Failed to start controls: {}", e);
            }
        });
        if let Err(e) = started {
            error!("Failed to wait for page load: {}", e);
        }
    }
}
