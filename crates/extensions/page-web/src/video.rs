//! `<video>` handles.

use js_sys::{Function, Promise, Reflect};
use tracing::debug;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlVideoElement;

use vidctl_protocols::{MediaRequest, PageError, Rect, VideoElement};

use crate::error::WebError;

#[derive(Debug, Clone, PartialEq)]
pub struct WebVideo(HtmlVideoElement);

impl WebVideo {
    pub fn new(element: HtmlVideoElement) -> Self {
        Self(element)
    }

    pub fn element(&self) -> &HtmlVideoElement {
        &self.0
    }

    /// `requestFullscreen()` returns a promise; look the method up directly
    /// so the promise is not dropped.
    fn fullscreen_promise(&self) -> Result<Promise, WebError> {
        let method = Reflect::get(&self.0, &JsValue::from_str("requestFullscreen"))?
            .dyn_into::<Function>()
            .map_err(|_| WebError::Js("requestFullscreen is not supported".to_string()))?;
        let promise = method
            .call0(&self.0)?
            .dyn_into::<Promise>()
            .map_err(|_| WebError::Js("requestFullscreen returned no promise".to_string()))?;
        Ok(promise)
    }
}

fn settle(promise: Result<Promise, WebError>) -> MediaRequest {
    Box::pin(async move {
        let promise = promise.map_err(|e| PageError::Rejected(e.to_string()))?;
        JsFuture::from(promise)
            .await
            .map(|_| ())
            .map_err(|e| PageError::Rejected(WebError::describe(&e)))
    })
}

impl VideoElement for WebVideo {
    fn has_layout_parent(&self) -> bool {
        self.0.offset_parent().is_some()
    }

    fn bounding_rect(&self) -> Rect {
        let rect = self.0.get_bounding_client_rect();
        Rect::new(rect.x(), rect.y(), rect.width(), rect.height())
    }

    fn paused(&self) -> bool {
        self.0.paused()
    }

    fn play(&self) -> MediaRequest {
        settle(self.0.play().map_err(WebError::from))
    }

    fn pause(&self) {
        if let Err(e) = self.0.pause() {
            debug!("pause() failed: {}", WebError::describe(&e));
        }
    }

    fn current_time(&self) -> f64 {
        self.0.current_time()
    }

    fn set_current_time(&self, seconds: f64) {
        self.0.set_current_time(seconds);
    }

    fn duration(&self) -> f64 {
        self.0.duration()
    }

    fn muted(&self) -> bool {
        self.0.muted()
    }

    fn set_muted(&self, muted: bool) {
        self.0.set_muted(muted);
    }

    fn volume(&self) -> f64 {
        self.0.volume()
    }

    fn set_volume(&self, volume: f64) {
        self.0.set_volume(volume);
    }

    fn request_fullscreen(&self) -> MediaRequest {
        settle(self.fullscreen_promise())
    }
}
