//! Controller errors.

use thiserror::Error;
use vidctl_protocols::PageError;
use vidctl_runloop::RunLoopError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Controller already active")]
    AlreadyActive,

    #[error(transparent)]
    Page(#[from] PageError),

    #[error(transparent)]
    RunLoop(#[from] RunLoopError),
}
