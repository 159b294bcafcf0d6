//! Key injection errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InjectError {
    #[error("Failed to build synthetic event: {0}")]
    EventConstruction(String),

    #[error("Failed to dispatch synthetic event: {0}")]
    DispatchFailed(String),
}
