//! # vidctl Core
//!
//! Keyboard control for the main video of a page.
//!
//! ## Components
//!
//! - [`scan_videos`] - every video in the document, shadow roots included
//! - [`Selector`] - picks the largest rendered video above a size threshold
//! - [`Tracker`] - periodic rescans and the active selection
//! - [`PresenceIndicator`] - the "controls active" marker
//! - [`InputRouter`] - decides per keystroke between direct control and
//!   site remapping
//! - [`FeedbackPresenter`] - the short-lived label over the video
//! - [`Controller`] - owns all of the above for one page
//!
//! Nothing here touches a browser API directly; everything goes through the
//! `vidctl-protocols` traits, so the same controller runs against the web
//! binding and the in-memory page.

pub mod controller;
pub mod error;
pub mod feedback;
pub mod indicator;
pub mod playback;
pub mod router;
pub mod scanner;
pub mod selector;
pub mod strategy;
pub mod tracker;

pub use controller::{Controller, ControllerState};
pub use error::CoreError;
pub use feedback::{Feedback, FeedbackPresenter};
pub use indicator::{INDICATOR_TEXT, PresenceIndicator};
pub use playback::apply_direct;
pub use router::{Disposition, InputRouter};
pub use scanner::scan_videos;
pub use selector::Selector;
pub use strategy::{Action, DirectAction, GenericStrategy, KeyStrategy, RemapStrategy, SiteMode};
pub use tracker::{ActiveSelection, SelectionChange, Tracker};
