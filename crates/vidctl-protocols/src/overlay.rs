//! Overlay surfaces drawn over the page.

use crate::error::PageError;

/// A text overlay that can be shown and hidden.
///
/// Implementations are handles onto page elements, so every method takes
/// `&self`.
pub trait Overlay {
    fn set_text(&self, text: &str);

    fn set_visible(&self, visible: bool);

    fn is_visible(&self) -> bool;
}

/// An overlay that positions itself over a video.
pub trait FeedbackSurface<V>: Overlay {
    /// Attach the overlay to the video's layout parent, giving the parent a
    /// positioned layout context when it has none.
    ///
    /// Fails with [`PageError::MissingTarget`] when the video has no parent.
    fn anchor_to(&self, video: &V) -> Result<(), PageError>;
}
