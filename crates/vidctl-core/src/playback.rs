//! Direct playback changes on a video element.

use tracing::{debug, warn};
use vidctl_protocols::{MediaRequest, Page, VideoElement};
use vidctl_runloop::Scheduler;

use crate::feedback::Feedback;
use crate::strategy::DirectAction;

/// Apply `action` to `video` and describe the result.
///
/// Browser requests that settle later (`play()`, `requestFullscreen()`) are
/// handed to the scheduler; a rejection is only logged. Returns `None` when
/// the action does not apply and the key should go to the page instead, which
/// happens for a digit seek on a video of unknown length.
pub fn apply_direct<P: Page>(
    page: &P,
    video: &P::Video,
    action: DirectAction,
    scheduler: &dyn Scheduler,
) -> Option<Feedback> {
    match action {
        DirectAction::TogglePlay => {
            if video.paused() {
                settle_later(scheduler, "play", video.play());
                Some(Feedback::Play)
            } else {
                video.pause();
                Some(Feedback::Pause)
            }
        }
        DirectAction::Seek(delta) => {
            let mut target = (video.current_time() + delta).max(0.0);
            let duration = video.duration();
            if duration.is_finite() {
                target = target.min(duration);
            }
            video.set_current_time(target);
            if delta < 0.0 {
                Some(Feedback::Rewind(-delta))
            } else {
                Some(Feedback::Forward(delta))
            }
        }
        DirectAction::ToggleMute => {
            let muted = !video.muted();
            video.set_muted(muted);
            Some(if muted {
                Feedback::Muted
            } else {
                Feedback::Unmuted
            })
        }
        DirectAction::ToggleFullscreen => {
            if page.fullscreen_active() {
                page.exit_fullscreen();
                Some(Feedback::ExitFullscreen)
            } else {
                settle_later(scheduler, "fullscreen", video.request_fullscreen());
                Some(Feedback::EnterFullscreen)
            }
        }
        DirectAction::Volume(delta) => {
            let volume = (video.volume() + delta).clamp(0.0, 1.0);
            video.set_volume(volume);
            Some(Feedback::Volume(volume))
        }
        DirectAction::SeekToDigit(digit) => {
            let duration = video.duration();
            if !duration.is_finite() {
                debug!("Seek to {}0% skipped, duration unknown", digit);
                return None;
            }
            video.set_current_time(duration * f64::from(digit) / 10.0);
            Some(Feedback::SeekTo(digit))
        }
    }
}

fn settle_later(scheduler: &dyn Scheduler, what: &'static str, request: MediaRequest) {
    scheduler.spawn_local(Box::pin(async move {
        if let Err(e) = request.await {
            warn!("{} request failed: {}", what, e);
        }
    }));
}

#[cfg(test)]
#[path = "playback_tests.rs"]
mod tests;
