//! Timers on `setTimeout`/`setInterval`.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use futures::future::LocalBoxFuture;
use tracing::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Window;

use vidctl_runloop::{
    RepeatingTask, RunLoopError, RunLoopResult, Scheduler, SingleShotTask, TimerId,
};

use crate::error::WebError;

enum TimerKind {
    Timeout,
    Interval,
}

struct PendingTimer {
    handle: i32,
    kind: TimerKind,
    /// Set by a single-shot callback once its task has returned.
    fired: Rc<Cell<bool>>,
    _callback: Closure<dyn FnMut()>,
}

/// [`Scheduler`] on the browser's event loop.
///
/// Callbacks stay owned here until cancelled; fired single-shot callbacks are
/// released on the next registration.
pub struct BrowserScheduler {
    window: Window,
    next_id: Cell<u64>,
    timers: RefCell<HashMap<TimerId, PendingTimer>>,
}

impl BrowserScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            next_id: Cell::new(0),
            timers: RefCell::new(HashMap::new()),
        }
    }

    fn next_id(&self) -> TimerId {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        TimerId(id)
    }

    fn release_fired(&self) {
        self.timers
            .borrow_mut()
            .retain(|_, timer| !timer.fired.get());
    }

    fn millis(duration: Duration) -> i32 {
        i32::try_from(duration.as_millis()).unwrap_or(i32::MAX)
    }

    /// Live timers, fired single-shots not yet released included.
    pub fn registered(&self) -> usize {
        self.timers.borrow().len()
    }
}

impl Scheduler for BrowserScheduler {
    fn schedule_once(&self, delay: Duration, task: SingleShotTask) -> RunLoopResult<TimerId> {
        self.release_fired();

        let fired = Rc::new(Cell::new(false));
        let mut task = Some(task);
        let done = fired.clone();
        let callback = Closure::<dyn FnMut()>::new(move || {
            if let Some(task) = task.take() {
                task();
            }
            done.set(true);
        });

        let handle = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                Self::millis(delay),
            )
            .map_err(|e| RunLoopError::Registration(WebError::describe(&e)))?;

        let id = self.next_id();
        self.timers.borrow_mut().insert(
            id,
            PendingTimer {
                handle,
                kind: TimerKind::Timeout,
                fired,
                _callback: callback,
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
        self.release_fired();

        let callback = Closure::wrap(task);
        let handle = self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                Self::millis(interval),
            )
            .map_err(|e| RunLoopError::Registration(WebError::describe(&e)))?;

        let id = self.next_id();
        debug!("Repeating {} every {:?}", id, interval);
        self.timers.borrow_mut().insert(
            id,
            PendingTimer {
                handle,
                kind: TimerKind::Interval,
                fired: Rc::new(Cell::new(false)),
                _callback: callback,
            },
        );
        Ok(id)
    }

    fn cancel(&self, id: TimerId) {
        let Some(timer) = self.timers.borrow_mut().remove(&id) else {
            return;
        };
        match timer.kind {
            TimerKind::Timeout => self.window.clear_timeout_with_handle(timer.handle),
            TimerKind::Interval => self.window.clear_interval_with_handle(timer.handle),
        }
    }

    fn spawn_local(&self, future: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(future);
    }
}
