//! Synthetic key recorder.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use tracing::debug;
use vidctl_protocols::{InjectError, KeyInjector, SyntheticKey};

type KeyListener = Rc<dyn Fn(&SyntheticKey)>;

/// Records injected key events instead of dispatching them.
///
/// A listener, when set, receives each recorded event synchronously, the way
/// the window delivers a dispatched keydown to its listeners before
/// `dispatchEvent` returns.
#[derive(Default)]
pub struct RecordingInjector {
    events: RefCell<Vec<SyntheticKey>>,
    failing: Cell<bool>,
    listener: RefCell<Option<KeyListener>>,
}

impl RecordingInjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every event injected so far.
    pub fn events(&self) -> Vec<SyntheticKey> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    /// Make subsequent injections fail.
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    pub fn set_listener(&self, listener: impl Fn(&SyntheticKey) + 'static) {
        *self.listener.borrow_mut() = Some(Rc::new(listener));
    }
}

impl fmt::Debug for RecordingInjector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingInjector")
            .field("events", &self.events.borrow().len())
            .field("failing", &self.failing.get())
            .field("listener", &self.listener.borrow().is_some())
            .finish()
    }
}

impl KeyInjector for RecordingInjector {
    fn inject(&self, key: &SyntheticKey) -> Result<(), InjectError> {
        if self.failing.get() {
            return Err(InjectError::DispatchFailed("dispatch disabled".to_string()));
        }
        debug!("Recorded synthetic keydown {:?}", key.key);
        self.events.borrow_mut().push(key.clone());

        let listener = self.listener.borrow().clone();
        if let Some(listener) = listener {
            listener(key);
        }
        Ok(())
    }
}
