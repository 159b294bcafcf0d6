//! Configuration validation.

use crate::schema::Config;

/// Rescans closer together than this cost more layout work than they buy.
const MIN_RECOMMENDED_SCAN_MS: u64 = 250;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_selection(config, &mut result);
        Self::validate_timing(config, &mut result);
        Self::validate_generic(config, &mut result);
        Self::validate_remap(config, &mut result);

        result
    }

    fn validate_selection(config: &Config, result: &mut ValidationResult) {
        let min = config.selection.min_dimension_px;
        if !min.is_finite() || min < 0.0 {
            result.add_error(ValidationError::new(
                "selection.min_dimension_px",
                "min_dimension_px must be a finite, non-negative number",
            ));
        }
    }

    fn validate_timing(config: &Config, result: &mut ValidationResult) {
        let timing = &config.timing;

        for (path, value) in [
            ("timing.scan_interval_ms", timing.scan_interval_ms),
            ("timing.indicator_hide_ms", timing.indicator_hide_ms),
            ("timing.feedback_hide_ms", timing.feedback_hide_ms),
        ] {
            if value == 0 {
                result.add_error(ValidationError::new(path, "must be greater than 0"));
            }
        }

        if timing.scan_interval_ms > 0 && timing.scan_interval_ms < MIN_RECOMMENDED_SCAN_MS {
            result.add_warning(ValidationWarning::new(
                "timing.scan_interval_ms",
                format!(
                    "scan interval below {}ms forces a full layout pass very often",
                    MIN_RECOMMENDED_SCAN_MS
                ),
            ));
        }

        if timing.feedback_hide_ms > timing.scan_interval_ms {
            result.add_warning(ValidationWarning::new(
                "timing.feedback_hide_ms",
                "feedback outlives a scan interval and may be shown over a replaced video",
            ));
        }
    }

    fn validate_generic(config: &Config, result: &mut ValidationResult) {
        let generic = &config.generic;

        for (path, value) in [
            ("generic.short_seek_secs", generic.short_seek_secs),
            ("generic.long_seek_secs", generic.long_seek_secs),
        ] {
            if !value.is_finite() || value <= 0.0 {
                result.add_error(ValidationError::new(path, "seek step must be positive"));
            }
        }

        let step = generic.volume_step;
        if !(step > 0.0 && step <= 1.0) {
            result.add_error(ValidationError::new(
                "generic.volume_step",
                "volume_step must be in (0, 1]",
            ));
        }
    }

    fn validate_remap(config: &Config, result: &mut ValidationResult) {
        for (i, target) in config.remap.iter().enumerate() {
            if target.host.trim_matches('.').trim().is_empty() {
                result.add_error(ValidationError::new(
                    format!("remap[{}].host", i),
                    "host cannot be empty",
                ));
            }
            if target.host.contains('/') || target.host.contains(':') {
                result.add_error(ValidationError::new(
                    format!("remap[{}].host", i),
                    "host must be a bare host name, not a URL",
                ));
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
