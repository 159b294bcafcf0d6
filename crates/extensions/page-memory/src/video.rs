//! Video elements and their media state.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use futures::future;
use vidctl_protocols::{MediaRequest, PageError, Rect, VideoElement};

use crate::page::{NodeId, PageState};

/// Playback state of one video element.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaState {
    pub paused: bool,
    pub current_time: f64,
    /// NaN until metadata is "loaded".
    pub duration: f64,
    pub muted: bool,
    pub volume: f64,
    /// Count of state-changing calls made through the element.
    pub touches: u32,
}

impl Default for MediaState {
    fn default() -> Self {
        Self {
            paused: true,
            current_time: 0.0,
            duration: f64::NAN,
            muted: false,
            volume: 1.0,
            touches: 0,
        }
    }
}

/// Handle to a `<video>` in a [`MemoryPage`](crate::MemoryPage).
#[derive(Clone)]
pub struct MemoryVideo {
    state: Rc<RefCell<PageState>>,
    id: NodeId,
}

impl MemoryVideo {
    pub(crate) fn new(state: Rc<RefCell<PageState>>, id: NodeId) -> Self {
        Self { state, id }
    }

    pub fn node(&self) -> NodeId {
        self.id
    }

    /// Snapshot of the element's media state.
    pub fn media(&self) -> MediaState {
        self.state
            .borrow()
            .node(self.id)
            .media
            .clone()
            .unwrap_or_default()
    }

    pub fn set_rect(&self, rect: Rect) {
        self.state.borrow_mut().node_mut(self.id).rect = rect;
    }

    pub fn set_hidden(&self, hidden: bool) {
        self.state.borrow_mut().node_mut(self.id).hidden = hidden;
    }

    /// Replace the media state without counting as a touch.
    pub fn load(&self, media: MediaState) {
        self.state.borrow_mut().node_mut(self.id).media = Some(media);
    }

    pub fn set_duration(&self, duration: f64) {
        self.with_media(|m| m.duration = duration);
    }

    pub fn is_fullscreen(&self) -> bool {
        self.state.borrow().fullscreen == Some(self.id)
    }

    fn with_media<R>(&self, f: impl FnOnce(&mut MediaState) -> R) -> R {
        let mut state = self.state.borrow_mut();
        let media = state
            .node_mut(self.id)
            .media
            .get_or_insert_with(MediaState::default);
        f(media)
    }

    fn touch<R>(&self, f: impl FnOnce(&mut MediaState) -> R) -> R {
        self.with_media(|m| {
            m.touches += 1;
            f(m)
        })
    }
}

impl PartialEq for MemoryVideo {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state) && self.id == other.id
    }
}

impl fmt::Debug for MemoryVideo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryVideo").field("node", &self.id).finish()
    }
}

impl VideoElement for MemoryVideo {
    fn has_layout_parent(&self) -> bool {
        self.state.borrow().is_rendered(self.id)
    }

    fn bounding_rect(&self) -> Rect {
        let state = self.state.borrow();
        if state.is_rendered(self.id) {
            state.node(self.id).rect
        } else {
            Rect::default()
        }
    }

    fn paused(&self) -> bool {
        self.with_media(|m| m.paused)
    }

    fn play(&self) -> MediaRequest {
        let allowed = self.state.borrow().autoplay_allowed;
        self.touch(|m| {
            if allowed {
                m.paused = false;
            }
        });
        let result = if allowed {
            Ok(())
        } else {
            Err(PageError::Rejected(
                "NotAllowedError: play() failed because the user didn't interact with the document first"
                    .to_string(),
            ))
        };
        Box::pin(future::ready(result))
    }

    fn pause(&self) {
        self.touch(|m| m.paused = true);
    }

    fn current_time(&self) -> f64 {
        self.with_media(|m| m.current_time)
    }

    fn set_current_time(&self, seconds: f64) {
        self.touch(|m| {
            let mut t = seconds.max(0.0);
            if m.duration.is_finite() {
                t = t.min(m.duration);
            }
            m.current_time = t;
        });
    }

    fn duration(&self) -> f64 {
        self.with_media(|m| m.duration)
    }

    fn muted(&self) -> bool {
        self.with_media(|m| m.muted)
    }

    fn set_muted(&self, muted: bool) {
        self.touch(|m| m.muted = muted);
    }

    fn volume(&self) -> f64 {
        self.with_media(|m| m.volume)
    }

    /// Stored as given; browsers throw for values outside `[0, 1]`, so
    /// callers are expected to clamp.
    fn set_volume(&self, volume: f64) {
        self.touch(|m| m.volume = volume);
    }

    fn request_fullscreen(&self) -> MediaRequest {
        let result = {
            let mut state = self.state.borrow_mut();
            if state.fullscreen_allowed {
                state.fullscreen = Some(self.id);
                Ok(())
            } else {
                Err(PageError::Rejected(
                    "Permissions check failed".to_string(),
                ))
            }
        };
        self.touch(|_| ());
        Box::pin(future::ready(result))
    }
}
