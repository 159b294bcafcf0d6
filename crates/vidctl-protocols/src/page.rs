//! The page a controller runs in.

use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use futures::future::LocalBoxFuture;

use crate::error::PageError;
use crate::geometry::Rect;
use crate::input::KeyInjector;
use crate::overlay::{FeedbackSurface, Overlay};

/// Outcome of a media request the browser settles asynchronously
/// (`play()`, `requestFullscreen()`).
pub type MediaRequest = LocalBoxFuture<'static, Result<(), PageError>>;

/// Handle to a video element.
///
/// Handles are cheap to clone and compare by element identity. Setters take
/// `&self` because the element lives in the page, not in the handle.
pub trait VideoElement: Clone + PartialEq + fmt::Debug + 'static {
    /// Whether the element has a rendering ancestor (`offsetParent`).
    fn has_layout_parent(&self) -> bool;

    fn bounding_rect(&self) -> Rect;

    fn paused(&self) -> bool;

    fn play(&self) -> MediaRequest;

    fn pause(&self);

    fn current_time(&self) -> f64;

    fn set_current_time(&self, seconds: f64);

    /// Media duration in seconds; NaN until metadata is loaded.
    fn duration(&self) -> f64;

    fn muted(&self) -> bool;

    fn set_muted(&self, muted: bool);

    fn volume(&self) -> f64;

    fn set_volume(&self, volume: f64);

    fn request_fullscreen(&self) -> MediaRequest;
}

/// The live document.
pub trait Page {
    /// A traversal root: the document or a shadow root.
    type Root: Clone;

    /// Identity of a root, cheap to hash.
    type RootKey: Eq + Hash;

    type Video: VideoElement;

    fn document_root(&self) -> Self::Root;

    /// Equal for handles to the same root, distinct otherwise.
    fn root_key(&self, root: &Self::Root) -> Self::RootKey;

    /// Video elements in `root`'s own tree, not descending into shadow roots.
    fn videos_in(&self, root: &Self::Root) -> Vec<Self::Video>;

    /// Shadow roots attached to elements in `root`'s own tree.
    fn shadow_roots_in(&self, root: &Self::Root) -> Vec<Self::Root>;

    /// Full URL of the page.
    fn location(&self) -> String;

    /// Whether any element of the page is currently fullscreen.
    fn fullscreen_active(&self) -> bool;

    fn exit_fullscreen(&self);

    /// Build the "controls active" indicator.
    fn create_indicator(&self) -> Result<Rc<dyn Overlay>, PageError>;

    /// Build the per-video feedback label.
    fn create_feedback_label(&self) -> Result<Rc<dyn FeedbackSurface<Self::Video>>, PageError>;

    fn key_injector(&self) -> Rc<dyn KeyInjector>;
}
