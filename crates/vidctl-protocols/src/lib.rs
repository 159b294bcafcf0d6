//! # vidctl Protocols
//!
//! Core protocol definitions (traits) for vidctl.
//! Contains only interface definitions - no implementations.
//!
//! ## Core Traits
//!
//! - [`Page`] - The live document a controller runs in
//! - [`VideoElement`] - Handle to one video element on the page
//! - [`Overlay`] - A text overlay the controller can show and hide
//! - [`FeedbackSurface`] - An overlay that anchors itself over a video
//! - [`KeyInjector`] - Dispatches synthetic key presses to the page

pub mod error;
pub mod geometry;
pub mod input;
pub mod overlay;
pub mod page;

pub use error::{InjectError, PageError};
pub use geometry::Rect;
pub use input::{KeyIdentity, KeyInjector, KeyPress, KeyTarget, SyntheticKey};
pub use overlay::{FeedbackSurface, Overlay};
pub use page::{MediaRequest, Page, VideoElement};
