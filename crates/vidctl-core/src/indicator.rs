//! The "controls active" marker.

use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, warn};
use vidctl_protocols::Overlay;
use vidctl_runloop::{Scheduler, TimerSlot};

pub const INDICATOR_TEXT: &str = "▶️ Universal Controls Active";

/// Shows the marker briefly whenever a new video is picked up.
pub struct PresenceIndicator {
    overlay: Option<Rc<dyn Overlay>>,
    hide: TimerSlot,
    hide_after: Duration,
}

impl PresenceIndicator {
    /// Wrap `overlay`, starting hidden. Without an overlay every call is a
    /// no-op.
    pub fn new(overlay: Option<Rc<dyn Overlay>>, hide_after: Duration) -> Self {
        if let Some(overlay) = &overlay {
            overlay.set_text(INDICATOR_TEXT);
            overlay.set_visible(false);
        }
        Self {
            overlay,
            hide: TimerSlot::new("indicator-hide"),
            hide_after,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.overlay.as_ref().is_some_and(|o| o.is_visible())
    }

    /// Pending hide timer, if one was scheduled.
    pub fn hide_timer(&self) -> &TimerSlot {
        &self.hide
    }

    /// Show now and hide after the configured delay, replacing any hide
    /// already pending.
    pub fn flash(&mut self, scheduler: &dyn Scheduler) {
        let Some(overlay) = self.overlay.clone() else {
            return;
        };
        overlay.set_visible(true);

        let hide = overlay.clone();
        let task = Box::new(move || hide.set_visible(false));
        if let Err(e) = self.hide.replace(scheduler, self.hide_after, task) {
            // Better hidden than stuck on screen.
            warn!("Failed to schedule indicator hide: {}", e);
            overlay.set_visible(false);
        }
    }

    /// Hide immediately.
    pub fn hide_now(&mut self, scheduler: &dyn Scheduler) {
        self.hide.clear(scheduler);
        if let Some(overlay) = &self.overlay {
            if overlay.is_visible() {
                debug!("Hiding controls indicator");
            }
            overlay.set_visible(false);
        }
    }
}
