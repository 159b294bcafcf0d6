//! Overlay elements.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use vidctl_protocols::{FeedbackSurface, Overlay, PageError};

use crate::page::{NodeId, PageState};
use crate::video::MemoryVideo;

/// A text overlay.
#[derive(Debug, Default)]
pub struct MemoryOverlay {
    text: RefCell<String>,
    visible: Cell<bool>,
    /// Number of visibility changes.
    toggles: Cell<u32>,
}

impl MemoryOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn toggles(&self) -> u32 {
        self.toggles.get()
    }
}

impl Overlay for MemoryOverlay {
    fn set_text(&self, text: &str) {
        *self.text.borrow_mut() = text.to_string();
    }

    fn set_visible(&self, visible: bool) {
        if self.visible.get() != visible {
            self.toggles.set(self.toggles.get() + 1);
        }
        self.visible.set(visible);
    }

    fn is_visible(&self) -> bool {
        self.visible.get()
    }
}

/// The feedback label, which lives inside the active video's parent.
#[derive(Debug)]
pub struct MemoryFeedbackLabel {
    page: Rc<RefCell<PageState>>,
    overlay: MemoryOverlay,
    parent: Cell<Option<NodeId>>,
    /// Number of times the label moved to a new parent.
    moves: Cell<u32>,
}

impl MemoryFeedbackLabel {
    pub(crate) fn new(page: Rc<RefCell<PageState>>) -> Self {
        Self {
            page,
            overlay: MemoryOverlay::new(),
            parent: Cell::new(None),
            moves: Cell::new(0),
        }
    }

    pub fn text(&self) -> String {
        self.overlay.text()
    }

    /// Element the label is attached to.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent.get()
    }

    pub fn moves(&self) -> u32 {
        self.moves.get()
    }
}

impl Overlay for MemoryFeedbackLabel {
    fn set_text(&self, text: &str) {
        self.overlay.set_text(text);
    }

    fn set_visible(&self, visible: bool) {
        self.overlay.set_visible(visible);
    }

    fn is_visible(&self) -> bool {
        self.overlay.is_visible()
    }
}

impl FeedbackSurface<MemoryVideo> for MemoryFeedbackLabel {
    fn anchor_to(&self, video: &MemoryVideo) -> Result<(), PageError> {
        let mut page = self.page.borrow_mut();
        let parent = page
            .node(video.node())
            .parent
            .ok_or_else(|| PageError::MissingTarget("video has no parent element".to_string()))?;

        if self.parent.get() != Some(parent) {
            let node = page.node_mut(parent);
            if !node.positioned {
                node.positioned = true;
            }
            self.parent.set(Some(parent));
            self.moves.set(self.moves.get() + 1);
        }
        Ok(())
    }
}
