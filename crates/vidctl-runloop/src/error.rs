//! Error types for the RunLoop module.

use thiserror::Error;

/// Errors that can occur while scheduling work.
#[derive(Debug, Error)]
pub enum RunLoopError {
    /// A repeating timer needs a non-zero interval.
    #[error("Invalid timer interval: {0:?}")]
    InvalidInterval(std::time::Duration),

    /// The host environment refused to register the timer.
    #[error("Timer registration failed: {0}")]
    Registration(String),

    /// A future could not be spawned.
    #[error("Spawn failed: {0}")]
    Spawn(String),
}

/// Result type for RunLoop operations.
pub type RunLoopResult<T> = Result<T, RunLoopError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_error_display() {
        let err = RunLoopError::InvalidInterval(Duration::ZERO);
        assert!(err.to_string().contains("Invalid timer interval"));

        let err = RunLoopError::Registration("setInterval threw".to_string());
        assert!(err.to_string().contains("setInterval threw"));

        let err = RunLoopError::Spawn("pool shut down".to_string());
        assert!(err.to_string().contains("Spawn failed"));
    }
}
