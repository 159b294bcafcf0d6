//! Page and media errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PageError {
    /// The element an operation needs is gone (no parent, detached, ...).
    #[error("Missing target: {0}")]
    MissingTarget(String),

    /// The browser refused the request (fullscreen without user activation,
    /// autoplay policy, ...).
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// The page could not build a required element.
    #[error("Page unavailable: {0}")]
    Unavailable(String),
}
