//! Synthetic key dispatch on the window.

use tracing::debug;
use web_sys::{KeyboardEvent, KeyboardEventInit, Window};

use vidctl_protocols::{InjectError, KeyInjector, SyntheticKey};

use crate::error::WebError;

/// Dispatches keydown events at the window, where site players listen.
#[derive(Debug, Clone)]
pub struct WindowInjector {
    window: Window,
}

impl WindowInjector {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl KeyInjector for WindowInjector {
    fn inject(&self, key: &SyntheticKey) -> Result<(), InjectError> {
        let init = KeyboardEventInit::new();
        init.set_key(&key.key);
        init.set_bubbles(key.bubbles);
        init.set_cancelable(key.cancelable);

        let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init)
            .map_err(|e| InjectError::EventConstruction(WebError::describe(&e)))?;
        let delivered = self
            .window
            .dispatch_event(&event)
            .map_err(|e| InjectError::DispatchFailed(WebError::describe(&e)))?;
        debug!("Dispatched keydown {:?}, default allowed: {}", key.key, delivered);
        Ok(())
    }
}
