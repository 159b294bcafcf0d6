//! Overlay elements.

use std::cell::Cell;

use tracing::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use vidctl_protocols::{FeedbackSurface, Overlay, PageError};

use crate::error::WebError;
use crate::video::WebVideo;

const INDICATOR_STYLE: &str = "position: fixed; bottom: 20px; left: 20px; \
    padding: 8px 15px; background-color: rgba(20, 20, 20, 0.85); color: white; \
    font-family: sans-serif; font-size: 14px; border-radius: 6px; \
    z-index: 2147483647; pointer-events: none; opacity: 0; transition: opacity 0.5s;";

const LABEL_STYLE: &str = "position: absolute; top: 50%; left: 50%; \
    transform: translate(-50%, -50%); padding: 12px 24px; \
    background-color: rgba(0, 0, 0, 0.75); color: white; font-family: sans-serif; \
    font-size: 28px; font-weight: bold; border-radius: 8px; \
    z-index: 2147483647; pointer-events: none; opacity: 0; \
    transition: opacity 0.5s ease-out;";

fn styled_div(document: &Document, css: &str) -> Result<HtmlElement, WebError> {
    let element = document.create_element("div")?;
    element.set_attribute("style", css)?;
    element
        .dyn_into::<HtmlElement>()
        .map_err(|_| WebError::Js("created element is not an HTMLElement".to_string()))
}

/// A text overlay shown and hidden through its opacity.
#[derive(Debug)]
pub struct WebOverlay {
    element: HtmlElement,
    visible: Cell<bool>,
}

impl WebOverlay {
    /// The bottom-left indicator, appended to `<body>`.
    pub fn indicator(document: &Document) -> Result<Self, WebError> {
        let element = styled_div(document, INDICATOR_STYLE)?;
        let body = document.body().ok_or(WebError::MissingGlobal("document.body"))?;
        body.append_child(&element)?;
        Ok(Self::wrap(element))
    }

    fn wrap(element: HtmlElement) -> Self {
        Self {
            element,
            visible: Cell::new(false),
        }
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }
}

impl Overlay for WebOverlay {
    fn set_text(&self, text: &str) {
        self.element.set_text_content(Some(text));
    }

    fn set_visible(&self, visible: bool) {
        let opacity = if visible { "1" } else { "0" };
        if let Err(e) = self.element.style().set_property("opacity", opacity) {
            debug!("Failed to set overlay opacity: {}", WebError::describe(&e));
            return;
        }
        self.visible.set(visible);
    }

    fn is_visible(&self) -> bool {
        self.visible.get()
    }
}

/// The feedback label, moved into the active video's parent on demand.
#[derive(Debug)]
pub struct WebFeedbackLabel {
    window: Window,
    overlay: WebOverlay,
}

impl WebFeedbackLabel {
    /// Created detached; it is attached on first use.
    pub fn new(window: &Window, document: &Document) -> Result<Self, WebError> {
        let element = styled_div(document, LABEL_STYLE)?;
        Ok(Self {
            window: window.clone(),
            overlay: WebOverlay::wrap(element),
        })
    }

    fn ensure_positioned(&self, parent: &Element) -> Result<(), WebError> {
        let Some(computed) = self.window.get_computed_style(parent)? else {
            return Ok(());
        };
        if computed.get_property_value("position")? != "static" {
            return Ok(());
        }
        if let Some(parent) = parent.dyn_ref::<HtmlElement>() {
            parent.style().set_property("position", "relative")?;
        }
        Ok(())
    }
}

impl Overlay for WebFeedbackLabel {
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

impl FeedbackSurface<WebVideo> for WebFeedbackLabel {
    fn anchor_to(&self, video: &WebVideo) -> Result<(), PageError> {
        let parent = video
            .element()
            .parent_element()
            .ok_or_else(|| PageError::MissingTarget("video has no parent element".to_string()))?;

        let label = self.overlay.element();
        if label.parent_element().as_ref() == Some(&parent) {
            return Ok(());
        }
        self.ensure_positioned(&parent)?;
        parent.append_child(label).map_err(WebError::from)?;
        Ok(())
    }
}
