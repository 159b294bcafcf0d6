//! Deterministic run loop with a virtual clock.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::time::Duration;

use futures::executor::{LocalPool, LocalSpawner};
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;
use tracing::{debug, warn};

use crate::error::{RunLoopError, RunLoopResult};
use crate::scheduler::{RepeatingTask, Scheduler, SingleShotTask, TimerId};

enum TimerTask {
    Once(SingleShotTask),
    Repeating {
        interval: Duration,
        task: RepeatingTask,
    },
}

struct TimerEntry {
    due: Duration,
    task: TimerTask,
}

#[derive(Default)]
struct RunLoopState {
    now: Duration,
    next_id: u64,
    timers: BTreeMap<TimerId, TimerEntry>,
    /// Timer whose callback is executing, and whether it was cancelled meanwhile.
    running: Option<(TimerId, bool)>,
    fired: u64,
}

impl RunLoopState {
    fn next_due(&self, limit: Duration) -> Option<TimerId> {
        self.timers
            .iter()
            .filter(|(_, entry)| entry.due <= limit)
            .min_by_key(|(id, entry)| (entry.due, **id))
            .map(|(id, _)| *id)
    }
}

/// Single-threaded [`Scheduler`] driven by explicit calls to [`advance`].
///
/// Timers fire in due-time order (ties in scheduling order) and the clock
/// jumps to each timer's due time before its callback runs. Spawned futures
/// are polled after every callback, the way browsers drain microtasks after
/// each task.
///
/// [`advance`]: ManualRunLoop::advance
pub struct ManualRunLoop {
    state: RefCell<RunLoopState>,
    pool: RefCell<LocalPool>,
    spawner: LocalSpawner,
}

impl ManualRunLoop {
    pub fn new() -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        Self {
            state: RefCell::new(RunLoopState::default()),
            pool: RefCell::new(pool),
            spawner,
        }
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// Number of timers that have not fired or been cancelled.
    pub fn pending_timers(&self) -> usize {
        self.state.borrow().timers.len()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.state.borrow().timers.contains_key(&id)
    }

    /// Total number of timer callbacks run so far.
    pub fn fired(&self) -> u64 {
        self.state.borrow().fired
    }

    /// Move the clock forward by `by`, firing every timer that comes due.
    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;

        loop {
            let (id, entry) = {
                let mut state = self.state.borrow_mut();
                let Some(id) = state.next_due(target) else {
                    break;
                };
                let Some(entry) = state.timers.remove(&id) else {
                    break;
                };
                state.now = entry.due;
                state.running = Some((id, false));
                state.fired += 1;
                (id, entry)
            };

            let rearm = match entry.task {
                TimerTask::Once(task) => {
                    task();
                    None
                }
                TimerTask::Repeating { interval, mut task } => {
                    task();
                    Some((interval, task))
                }
            };

            {
                let mut state = self.state.borrow_mut();
                let cancelled = matches!(state.running.take(), Some((_, true)));
                if let (Some((interval, task)), false) = (rearm, cancelled) {
                    let due = entry.due + interval;
                    state.timers.insert(
                        id,
                        TimerEntry {
                            due,
                            task: TimerTask::Repeating { interval, task },
                        },
                    );
                }
            }

            self.run_until_stalled();
        }

        self.state.borrow_mut().now = target;
        self.run_until_stalled();
    }

    /// Poll spawned futures until none can make progress.
    pub fn run_until_stalled(&self) {
        if let Ok(mut pool) = self.pool.try_borrow_mut() {
            pool.run_until_stalled();
        }
    }
}

impl Default for ManualRunLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for ManualRunLoop {
    fn schedule_once(&self, delay: Duration, task: SingleShotTask) -> RunLoopResult<TimerId> {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = TimerId(state.next_id);
        let due = state.now + delay;
        state.timers.insert(
            id,
            TimerEntry {
                due,
                task: TimerTask::Once(task),
            },
        );
        Ok(id)
    }

    fn schedule_repeating(
        &self,
        interval: Duration,
        task: RepeatingTask,
    ) -> RunLoopResult<TimerId> {
        if interval.is_zero() {
            return Err(RunLoopError::InvalidInterval(interval));
        }

        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = TimerId(state.next_id);
        let due = state.now + interval;
        state.timers.insert(
            id,
            TimerEntry {
                due,
                task: TimerTask::Repeating { interval, task },
            },
        );
        debug!("Repeating {} every {:?}", id, interval);
        Ok(id)
    }

    fn cancel(&self, id: TimerId) {
        let mut state = self.state.borrow_mut();
        state.timers.remove(&id);
        if let Some((running, cancelled)) = state.running.as_mut() {
            if *running == id {
                *cancelled = true;
            }
        }
    }

    fn spawn_local(&self, future: LocalBoxFuture<'static, ()>) {
        if let Err(e) = self.spawner.spawn_local(future) {
            warn!("{}", RunLoopError::Spawn(e.to_string()));
        }
    }
}

#[cfg(test)]
#[path = "run_loop_tests.rs"]
mod tests;
