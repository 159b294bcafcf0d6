//! The live document.

use std::cell::Cell;
use std::rc::Rc;

use js_sys::{Object, WeakMap};
use tracing::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlVideoElement, NodeList, ShadowRoot, Window};

use vidctl_protocols::{FeedbackSurface, KeyInjector, Overlay, Page, PageError};

use crate::error::WebError;
use crate::injector::WindowInjector;
use crate::overlay::{WebFeedbackLabel, WebOverlay};
use crate::video::WebVideo;

/// A traversal root.
#[derive(Debug, Clone, PartialEq)]
pub enum WebRoot {
    Document(Document),
    Shadow(ShadowRoot),
}

impl WebRoot {
    fn query_all(&self, selector: &str) -> Result<NodeList, WebError> {
        let list = match self {
            WebRoot::Document(document) => document.query_selector_all(selector)?,
            WebRoot::Shadow(shadow) => shadow.query_selector_all(selector)?,
        };
        Ok(list)
    }

    fn elements<T: JsCast>(&self, selector: &str) -> Vec<T> {
        let list = match self.query_all(selector) {
            Ok(list) => list,
            Err(e) => {
                debug!("querySelectorAll({:?}) failed: {}", selector, e);
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<T>().ok())
            .collect()
    }
}

/// The document the module was injected into.
#[derive(Debug, Clone)]
pub struct WebPage {
    window: Window,
    document: Document,
    /// Shadow root -> numeric key, assigned on first sight.
    root_ids: WeakMap,
    next_root_id: Rc<Cell<u32>>,
}

impl WebPage {
    pub fn current() -> Result<Self, WebError> {
        let window = web_sys::window().ok_or(WebError::MissingGlobal("window"))?;
        let document = window
            .document()
            .ok_or(WebError::MissingGlobal("document"))?;
        Ok(Self {
            window,
            document,
            root_ids: WeakMap::new(),
            next_root_id: Rc::new(Cell::new(0)),
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl Page for WebPage {
    type Root = WebRoot;
    type RootKey = u32;
    type Video = WebVideo;

    fn document_root(&self) -> WebRoot {
        WebRoot::Document(self.document.clone())
    }

    /// The document is key 0; shadow roots are numbered as they are met.
    fn root_key(&self, root: &WebRoot) -> u32 {
        let WebRoot::Shadow(shadow) = root else {
            return 0;
        };
        let object: &Object = shadow.unchecked_ref();
        if let Some(id) = self.root_ids.get(object).as_f64() {
            return id as u32;
        }
        let id = self.next_root_id.get() + 1;
        self.next_root_id.set(id);
        self.root_ids.set(object, &JsValue::from(id));
        id
    }

    fn videos_in(&self, root: &WebRoot) -> Vec<WebVideo> {
        root.elements::<HtmlVideoElement>("video")
            .into_iter()
            .map(WebVideo::new)
            .collect()
    }

    fn shadow_roots_in(&self, root: &WebRoot) -> Vec<WebRoot> {
        root.elements::<Element>("*")
            .into_iter()
            .filter_map(|element| element.shadow_root())
            .map(WebRoot::Shadow)
            .collect()
    }

    fn location(&self) -> String {
        self.window.location().href().unwrap_or_default()
    }

    fn fullscreen_active(&self) -> bool {
        self.document.fullscreen_element().is_some()
    }

    fn exit_fullscreen(&self) {
        self.document.exit_fullscreen();
    }

    fn create_indicator(&self) -> Result<Rc<dyn Overlay>, PageError> {
        let indicator = WebOverlay::indicator(&self.document)?;
        Ok(Rc::new(indicator))
    }

    fn create_feedback_label(&self) -> Result<Rc<dyn FeedbackSurface<WebVideo>>, PageError> {
        let label = WebFeedbackLabel::new(&self.window, &self.document)?;
        Ok(Rc::new(label))
    }

    fn key_injector(&self) -> Rc<dyn KeyInjector> {
        Rc::new(WindowInjector::new(self.window.clone()))
    }
}
