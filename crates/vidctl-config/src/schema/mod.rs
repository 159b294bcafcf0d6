//! Configuration schema definitions.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub selection: SelectionConfig,

    #[serde(default)]
    pub timing: TimingConfig,

    #[serde(default)]
    pub generic: GenericConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Hosts whose own player receives remapped keys.
    #[serde(default = "default_remap")]
    pub remap: Vec<RemapTarget>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            selection: SelectionConfig::default(),
            timing: TimingConfig::default(),
            generic: GenericConfig::default(),
            logging: LoggingConfig::default(),
            remap: default_remap(),
        }
    }
}

/// Video selection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Width and height must both exceed this (CSS px) for a video to be
    /// selectable.
    #[serde(default = "default_min_dimension")]
    pub min_dimension_px: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            min_dimension_px: default_min_dimension(),
        }
    }
}

fn default_min_dimension() -> f64 {
    150.0
}

/// Scheduling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Interval between rescans of the page.
    #[serde(default = "default_scan_interval")]
    pub scan_interval_ms: u64,

    /// How long the "controls active" indicator stays up after a new video
    /// is picked.
    #[serde(default = "default_indicator_hide")]
    pub indicator_hide_ms: u64,

    /// How long a feedback label stays up.
    #[serde(default = "default_feedback_hide")]
    pub feedback_hide_ms: u64,
}

impl TimingConfig {
    pub fn scan_interval(&self) -> Duration {
        Duration::from_millis(self.scan_interval_ms)
    }

    pub fn indicator_hide(&self) -> Duration {
        Duration::from_millis(self.indicator_hide_ms)
    }

    pub fn feedback_hide(&self) -> Duration {
        Duration::from_millis(self.feedback_hide_ms)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            scan_interval_ms: default_scan_interval(),
            indicator_hide_ms: default_indicator_hide(),
            feedback_hide_ms: default_feedback_hide(),
        }
    }
}

fn default_scan_interval() -> u64 {
    2000
}

fn default_indicator_hide() -> u64 {
    3000
}

fn default_feedback_hide() -> u64 {
    600
}

/// Step sizes for direct manipulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenericConfig {
    /// Seek distance for `a` / `d`.
    #[serde(default = "default_short_seek")]
    pub short_seek_secs: f64,

    /// Seek distance for `j` / `l`.
    #[serde(default = "default_long_seek")]
    pub long_seek_secs: f64,

    /// Volume change per arrow key press.
    #[serde(default = "default_volume_step")]
    pub volume_step: f64,
}

impl Default for GenericConfig {
    fn default() -> Self {
        Self {
            short_seek_secs: default_short_seek(),
            long_seek_secs: default_long_seek(),
            volume_step: default_volume_step(),
        }
    }
}

fn default_short_seek() -> f64 {
    5.0
}

fn default_long_seek() -> f64 {
    10.0
}

fn default_volume_step() -> f64 {
    0.05
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive ("info", "vidctl_core=debug", ...).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Key remapping profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemapProfile {
    /// Space / arrow keys / `m` / `f`, as understood by Netflix's player.
    Netflix,
}

/// A host that gets key remapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemapTarget {
    /// Host name; subdomains match too.
    pub host: String,

    pub profile: RemapProfile,
}

impl RemapTarget {
    pub fn new(host: impl Into<String>, profile: RemapProfile) -> Self {
        Self {
            host: host.into(),
            profile,
        }
    }

    /// Whether `hostname` is this target or one of its subdomains.
    pub fn matches(&self, hostname: &str) -> bool {
        let target = self.host.trim_start_matches('.');
        if target.is_empty() {
            return false;
        }
        let hostname = hostname.trim_end_matches('.').as_bytes();
        let Some(prefix_len) = hostname.len().checked_sub(target.len()) else {
            return false;
        };
        if prefix_len > 0 && hostname[prefix_len - 1] != b'.' {
            return false;
        }
        hostname[prefix_len..].eq_ignore_ascii_case(target.as_bytes())
    }
}

fn default_remap() -> Vec<RemapTarget> {
    vec![RemapTarget::new("netflix.com", RemapProfile::Netflix)]
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
