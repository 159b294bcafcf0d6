//! # vidctl RunLoop
//!
//! Cooperative scheduling for a controller living inside a web page.
//!
//! Everything runs on one thread: rescans, key handling, timer callbacks and
//! the continuations of browser promises interleave but never overlap, so
//! state shared between them needs no locking.
//!
//! ## Key Components
//!
//! - [`Scheduler`]: the scheduling contract (single-shot and repeating timers,
//!   local futures)
//! - [`TimerSlot`]: at most one pending single-shot timer, cancel-and-replace
//! - [`ManualRunLoop`]: deterministic implementation driven by a virtual clock
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use vidctl_runloop::{ManualRunLoop, TimerSlot};
//!
//! let run_loop = ManualRunLoop::new();
//! let mut slot = TimerSlot::new("feedback-hide");
//!
//! slot.replace(&run_loop, Duration::from_millis(600), Box::new(|| {})).unwrap();
//! slot.replace(&run_loop, Duration::from_millis(600), Box::new(|| {})).unwrap();
//! assert_eq!(run_loop.pending_timers(), 1);
//!
//! run_loop.advance(Duration::from_millis(600));
//! assert_eq!(run_loop.pending_timers(), 0);
//! ```

pub mod error;
pub mod run_loop;
pub mod scheduler;
pub mod timer;

pub use error::{RunLoopError, RunLoopResult};
pub use run_loop::ManualRunLoop;
pub use scheduler::{RepeatingTask, Scheduler, SingleShotTask, TimerId};
pub use timer::TimerSlot;
