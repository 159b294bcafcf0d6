//! The scheduling contract.

use std::fmt;
use std::time::Duration;

use futures::future::LocalBoxFuture;

use crate::error::RunLoopResult;

/// Callback for a single-shot timer.
pub type SingleShotTask = Box<dyn FnOnce()>;

/// Callback for a repeating timer.
pub type RepeatingTask = Box<dyn FnMut()>;

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Cooperative scheduler.
///
/// Callbacks run on the scheduler's thread, one at a time, never re-entrantly
/// from inside `schedule_*` or `cancel`.
pub trait Scheduler {
    /// Run `task` once after `delay`.
    fn schedule_once(&self, delay: Duration, task: SingleShotTask) -> RunLoopResult<TimerId>;

    /// Run `task` every `interval` until cancelled.
    fn schedule_repeating(&self, interval: Duration, task: RepeatingTask)
        -> RunLoopResult<TimerId>;

    /// Cancel a timer. Unknown or already-fired timers are ignored.
    fn cancel(&self, id: TimerId);

    /// Drive a future to completion on the scheduler's thread.
    fn spawn_local(&self, future: LocalBoxFuture<'static, ()>);
}
