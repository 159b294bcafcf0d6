//! On-video feedback.

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, warn};
use vidctl_protocols::{FeedbackSurface, Overlay, VideoElement};
use vidctl_runloop::{Scheduler, TimerSlot};

/// What the label says after a direct action.
#[derive(Debug, Clone, PartialEq)]
pub enum Feedback {
    Play,
    Pause,
    /// Seconds skipped backwards.
    Rewind(f64),
    /// Seconds skipped forwards.
    Forward(f64),
    Muted,
    Unmuted,
    EnterFullscreen,
    ExitFullscreen,
    /// Volume after the change, in `[0, 1]`.
    Volume(f64),
    /// Digit key used for a jump to `digit * 10` percent.
    SeekTo(u8),
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::Play => write!(f, "▶ Play"),
            Feedback::Pause => write!(f, "❚❚ Pause"),
            Feedback::Rewind(secs) => write!(f, "« {}s", secs),
            Feedback::Forward(secs) => write!(f, "{}s »", secs),
            Feedback::Muted => write!(f, "🔇 Muted"),
            Feedback::Unmuted => write!(f, "🔊 Unmuted"),
            Feedback::EnterFullscreen => write!(f, "⛶ Enter Fullscreen"),
            Feedback::ExitFullscreen => write!(f, "Exit Fullscreen"),
            Feedback::Volume(level) => write!(f, "Volume: {}%", (level * 100.0).round() as i64),
            Feedback::SeekTo(digit) => write!(f, "Seek to {}0%", digit),
        }
    }
}

/// Shows [`Feedback`] over the active video for a short time.
pub struct FeedbackPresenter<V> {
    label: Option<Rc<dyn FeedbackSurface<V>>>,
    hide: TimerSlot,
    hide_after: Duration,
}

impl<V: VideoElement> FeedbackPresenter<V> {
    pub fn new(label: Option<Rc<dyn FeedbackSurface<V>>>, hide_after: Duration) -> Self {
        if let Some(label) = &label {
            label.set_visible(false);
        }
        Self {
            label,
            hide: TimerSlot::new("feedback-hide"),
            hide_after,
        }
    }

    pub fn hide_timer(&self) -> &TimerSlot {
        &self.hide
    }

    /// Display `feedback` over `video`.
    ///
    /// Does nothing without a video, without a label, or when the video is
    /// detached from any parent.
    pub fn show(&mut self, scheduler: &dyn Scheduler, video: Option<&V>, feedback: &Feedback) {
        let (Some(label), Some(video)) = (self.label.clone(), video) else {
            return;
        };
        if let Err(e) = label.anchor_to(video) {
            debug!("Feedback skipped: {}", e);
            return;
        }

        label.set_text(&feedback.to_string());
        label.set_visible(true);

        let hide = label.clone();
        let task = Box::new(move || hide.set_visible(false));
        if let Err(e) = self.hide.replace(scheduler, self.hide_after, task) {
            warn!("Failed to schedule feedback hide: {}", e);
            label.set_visible(false);
        }
    }
}

#[cfg(test)]
#[path = "feedback_tests.rs"]
mod tests;
