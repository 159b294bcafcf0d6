//! Cancel-and-replace single-shot timers.

use std::time::Duration;

use tracing::debug;

use crate::error::RunLoopResult;
use crate::scheduler::{Scheduler, SingleShotTask, TimerId};

/// Holds at most one pending single-shot timer.
///
/// Scheduling through the slot cancels whatever it held before, so the last
/// request always wins and nothing queues up behind it.
#[derive(Debug)]
pub struct TimerSlot {
    name: &'static str,
    pending: Option<TimerId>,
    replaced: u64,
}

impl TimerSlot {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            pending: None,
            replaced: 0,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The most recently scheduled timer. It may already have fired.
    pub fn pending(&self) -> Option<TimerId> {
        self.pending
    }

    /// How many times a pending timer was cancelled to make room for a new one.
    pub fn replaced(&self) -> u64 {
        self.replaced
    }

    /// Cancel the held timer, if any, then schedule `task` after `delay`.
    pub fn replace(
        &mut self,
        scheduler: &dyn Scheduler,
        delay: Duration,
        task: SingleShotTask,
    ) -> RunLoopResult<TimerId> {
        if self.clear(scheduler) {
            self.replaced += 1;
        }
        let id = scheduler.schedule_once(delay, task)?;
        debug!("{} scheduled {} in {:?}", self.name, id, delay);
        self.pending = Some(id);
        Ok(id)
    }

    /// Cancel the held timer. Returns whether one was held.
    pub fn clear(&mut self, scheduler: &dyn Scheduler) -> bool {
        match self.pending.take() {
            Some(id) => {
                scheduler.cancel(id);
                debug!("{} cancelled {}", self.name, id);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "timer_tests.rs"]
mod tests;
