//! Element tree and the `Page` implementation.

use std::cell::RefCell;
use std::rc::Rc;

use vidctl_protocols::{
    FeedbackSurface, KeyInjector, KeyPress, KeyTarget, Overlay, Page, PageError, Rect,
};

use crate::injector::RecordingInjector;
use crate::overlay::{MemoryFeedbackLabel, MemoryOverlay};
use crate::video::{MediaState, MemoryVideo};

/// Index of a node in a [`MemoryPage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// A traversal root: the document node or a shadow root node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryRoot(pub(crate) NodeId);

impl MemoryRoot {
    pub fn node(&self) -> NodeId {
        self.0
    }
}

#[derive(Debug)]
pub(crate) struct NodeData {
    pub(crate) tag: String,
    pub(crate) element_id: Option<String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    /// Shadow roots attached to this element. Normally at most one; tests may
    /// attach a root to several hosts to build degenerate structures.
    pub(crate) shadow_root: Option<NodeId>,
    /// For shadow root nodes, the element hosting them.
    pub(crate) host: Option<NodeId>,
    pub(crate) hidden: bool,
    pub(crate) positioned: bool,
    pub(crate) content_editable: bool,
    pub(crate) rect: Rect,
    pub(crate) media: Option<MediaState>,
}

impl NodeData {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_lowercase(),
            element_id: None,
            parent: None,
            children: Vec::new(),
            shadow_root: None,
            host: None,
            hidden: false,
            positioned: false,
            content_editable: false,
            rect: Rect::default(),
            media: None,
        }
    }
}

#[derive(Debug)]
pub(crate) struct PageState {
    pub(crate) url: String,
    pub(crate) nodes: Vec<NodeData>,
    pub(crate) document: NodeId,
    pub(crate) body: NodeId,
    pub(crate) fullscreen: Option<NodeId>,
    pub(crate) fullscreen_allowed: bool,
    pub(crate) autoplay_allowed: bool,
}

impl PageState {
    pub(crate) fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.0]
    }

    /// Parent in the flat tree: the parent element, or the host for a shadow
    /// root.
    fn flat_parent(&self, id: NodeId) -> Option<NodeId> {
        let node = self.node(id);
        node.parent.or(node.host)
    }

    /// Whether the node is connected to the document and no node on the way
    /// up is hidden.
    pub(crate) fn is_rendered(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if self.node(current).hidden {
                return false;
            }
            if current == self.document {
                return true;
            }
            match self.flat_parent(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Nodes of `root`'s own tree, in document order, not entering shadow
    /// roots.
    fn light_tree(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.node(root).children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.node(id).children.iter().rev().copied());
        }
        out
    }
}

/// An in-memory document.
///
/// Cloning yields another handle onto the same document.
#[derive(Debug, Clone)]
pub struct MemoryPage {
    pub(crate) state: Rc<RefCell<PageState>>,
    indicator: Rc<RefCell<Option<Rc<MemoryOverlay>>>>,
    label: Rc<RefCell<Option<Rc<MemoryFeedbackLabel>>>>,
    injector: Rc<RecordingInjector>,
}

impl MemoryPage {
    /// A document at `url` containing an empty `<body>`.
    pub fn new(url: impl Into<String>) -> Self {
        let mut document = NodeData::new("#document");
        let mut body = NodeData::new("body");
        body.parent = Some(NodeId(0));
        document.children.push(NodeId(1));

        let state = PageState {
            url: url.into(),
            nodes: vec![document, body],
            document: NodeId(0),
            body: NodeId(1),
            fullscreen: None,
            fullscreen_allowed: true,
            autoplay_allowed: true,
        };

        Self {
            state: Rc::new(RefCell::new(state)),
            indicator: Rc::new(RefCell::new(None)),
            label: Rc::new(RefCell::new(None)),
            injector: Rc::new(RecordingInjector::new()),
        }
    }

    pub fn body(&self) -> NodeId {
        self.state.borrow().body
    }

    pub fn set_url(&self, url: impl Into<String>) {
        self.state.borrow_mut().url = url.into();
    }

    /// Append a new element under `parent` (an element or a shadow root).
    pub fn append_element(&self, parent: NodeId, tag: &str) -> NodeId {
        let mut state = self.state.borrow_mut();
        let id = NodeId(state.nodes.len());
        let mut node = NodeData::new(tag);
        node.parent = Some(parent);
        state.nodes.push(node);
        state.node_mut(parent).children.push(id);
        id
    }

    /// Append a `<video>` with the given rendered box.
    pub fn append_video(&self, parent: NodeId, rect: Rect) -> MemoryVideo {
        let id = self.append_element(parent, "video");
        {
            let mut state = self.state.borrow_mut();
            let node = state.node_mut(id);
            node.rect = rect;
            node.media = Some(MediaState::default());
        }
        MemoryVideo::new(self.state.clone(), id)
    }

    /// Attach an open shadow root to `host` and return it.
    pub fn attach_shadow(&self, host: NodeId) -> NodeId {
        let mut state = self.state.borrow_mut();
        let id = NodeId(state.nodes.len());
        let mut root = NodeData::new("#shadow-root");
        root.host = Some(host);
        state.nodes.push(root);
        state.node_mut(host).shadow_root = Some(id);
        id
    }

    /// Attach an existing shadow root to another host as well.
    ///
    /// Browsers never do this; it exists to exercise traversal guards.
    pub fn share_shadow_root(&self, host: NodeId, shadow: NodeId) {
        self.state.borrow_mut().node_mut(host).shadow_root = Some(shadow);
    }

    /// Detach `node` from its parent.
    pub fn remove(&self, node: NodeId) {
        let mut state = self.state.borrow_mut();
        if let Some(parent) = state.node_mut(node).parent.take() {
            state.node_mut(parent).children.retain(|c| *c != node);
        }
    }

    /// `display: none` on or off.
    pub fn set_hidden(&self, node: NodeId, hidden: bool) {
        self.state.borrow_mut().node_mut(node).hidden = hidden;
    }

    /// Give the element a non-`static` position.
    pub fn set_positioned(&self, node: NodeId, positioned: bool) {
        self.state.borrow_mut().node_mut(node).positioned = positioned;
    }

    pub fn is_positioned(&self, node: NodeId) -> bool {
        self.state.borrow().node(node).positioned
    }

    pub fn set_content_editable(&self, node: NodeId, editable: bool) {
        self.state.borrow_mut().node_mut(node).content_editable = editable;
    }

    pub fn set_element_id(&self, node: NodeId, id: impl Into<String>) {
        self.state.borrow_mut().node_mut(node).element_id = Some(id.into());
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.state.borrow().node(node).parent
    }

    pub fn tag(&self, node: NodeId) -> String {
        self.state.borrow().node(node).tag.clone()
    }

    /// First node carrying the given `id` attribute, in any tree.
    pub fn find_by_id(&self, element_id: &str) -> Option<NodeId> {
        let state = self.state.borrow();
        state
            .nodes
            .iter()
            .position(|n| n.element_id.as_deref() == Some(element_id))
            .map(NodeId)
    }

    /// Handle to the video element `node`.
    pub fn video(&self, node: NodeId) -> Option<MemoryVideo> {
        let is_video = self.state.borrow().node(node).media.is_some();
        is_video.then(|| MemoryVideo::new(self.state.clone(), node))
    }

    /// Handle to the video carrying the given `id` attribute.
    pub fn video_by_id(&self, element_id: &str) -> Option<MemoryVideo> {
        self.find_by_id(element_id).and_then(|node| self.video(node))
    }

    /// Build the key press a browser would report for `key` typed into `node`.
    pub fn key_press_on(&self, node: NodeId, key: &str) -> KeyPress {
        let state = self.state.borrow();
        let data = state.node(node);
        KeyPress::new(key).with_target(KeyTarget::classify(&data.tag, data.content_editable))
    }

    /// Element currently fullscreen, if any.
    pub fn fullscreen_element(&self) -> Option<NodeId> {
        self.state.borrow().fullscreen
    }

    /// Whether `requestFullscreen()` succeeds (it needs user activation in
    /// real browsers).
    pub fn set_fullscreen_allowed(&self, allowed: bool) {
        self.state.borrow_mut().fullscreen_allowed = allowed;
    }

    /// Whether `play()` succeeds.
    pub fn set_autoplay_allowed(&self, allowed: bool) {
        self.state.borrow_mut().autoplay_allowed = allowed;
    }

    /// The indicator built by [`Page::create_indicator`], if any.
    pub fn indicator(&self) -> Option<Rc<MemoryOverlay>> {
        self.indicator.borrow().clone()
    }

    /// The label built by [`Page::create_feedback_label`], if any.
    pub fn feedback_label(&self) -> Option<Rc<MemoryFeedbackLabel>> {
        self.label.borrow().clone()
    }

    pub fn injector(&self) -> Rc<RecordingInjector> {
        self.injector.clone()
    }
}

impl Page for MemoryPage {
    type Root = MemoryRoot;
    type RootKey = NodeId;
    type Video = MemoryVideo;

    fn document_root(&self) -> MemoryRoot {
        MemoryRoot(self.state.borrow().document)
    }

    fn root_key(&self, root: &MemoryRoot) -> NodeId {
        root.0
    }

    fn videos_in(&self, root: &MemoryRoot) -> Vec<MemoryVideo> {
        let state = self.state.borrow();
        state
            .light_tree(root.0)
            .into_iter()
            .filter(|id| state.node(*id).media.is_some())
            .map(|id| MemoryVideo::new(self.state.clone(), id))
            .collect()
    }

    fn shadow_roots_in(&self, root: &MemoryRoot) -> Vec<MemoryRoot> {
        let state = self.state.borrow();
        state
            .light_tree(root.0)
            .into_iter()
            .filter_map(|id| state.node(id).shadow_root)
            .map(MemoryRoot)
            .collect()
    }

    fn location(&self) -> String {
        self.state.borrow().url.clone()
    }

    fn fullscreen_active(&self) -> bool {
        self.state.borrow().fullscreen.is_some()
    }

    fn exit_fullscreen(&self) {
        self.state.borrow_mut().fullscreen = None;
    }

    fn create_indicator(&self) -> Result<Rc<dyn Overlay>, PageError> {
        let overlay = Rc::new(MemoryOverlay::new());
        *self.indicator.borrow_mut() = Some(overlay.clone());
        Ok(overlay)
    }

    fn create_feedback_label(&self) -> Result<Rc<dyn FeedbackSurface<MemoryVideo>>, PageError> {
        let label = Rc::new(MemoryFeedbackLabel::new(self.state.clone()));
        *self.label.borrow_mut() = Some(label.clone());
        Ok(label)
    }

    fn key_injector(&self) -> Rc<dyn KeyInjector> {
        self.injector.clone()
    }
}

#[cfg(test)]
#[path = "page_tests.rs"]
mod tests;
