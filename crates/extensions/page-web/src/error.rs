//! Browser binding errors.

use thiserror::Error;
use vidctl_core::CoreError;
use vidctl_protocols::PageError;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum WebError {
    /// A global the page should expose is missing.
    #[error("Missing browser global: {0}")]
    MissingGlobal(&'static str),

    /// A DOM call threw.
    #[error("JavaScript error: {0}")]
    Js(String),

    #[error("Activation failed: {0}")]
    Activation(#[from] CoreError),
}

impl WebError {
    /// Describe a thrown value: its message for `Error` objects, the string
    /// itself for strings, the debug form otherwise.
    pub fn describe(value: &JsValue) -> String {
        if let Some(text) = value.as_string() {
            return text;
        }
        match js_sys::Reflect::get(value, &JsValue::from_str("message")) {
            Ok(message) if message.is_string() => message.as_string().unwrap_or_default(),
            _ => format!("{:?}", value),
        }
    }
}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        WebError::Js(Self::describe(&value))
    }
}

impl From<WebError> for PageError {
    fn from(err: WebError) -> Self {
        PageError::Unavailable(err.to_string())
    }
}
