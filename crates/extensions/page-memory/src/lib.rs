//! In-memory page backend for vidctl.
//!
//! Models just enough of a document for the controller: an element tree with
//! shadow roots, per-element layout boxes and visibility, media state for
//! video elements, the two overlays, and a recorder for synthetic key events.
//!
//! Pages can be built node by node or loaded from a JSON [`PageFixture`].

mod fixture;
mod injector;
mod overlay;
mod page;
mod video;

pub use fixture::{FixtureError, FixtureNode, PageFixture};
pub use injector::RecordingInjector;
pub use overlay::{MemoryFeedbackLabel, MemoryOverlay};
pub use page::{MemoryPage, MemoryRoot, NodeId};
pub use video::{MediaState, MemoryVideo};
