//! Keydown listener and activation timing.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement, KeyboardEvent, Window};

use vidctl_core::Controller;
use vidctl_protocols::{KeyPress, KeyTarget, Page};

use crate::error::WebError;

/// Describe a DOM keydown for the router.
///
/// The target is the first entry of the composed path, so a field inside a
/// shadow root is seen as itself rather than as its host.
pub fn key_press_from_event(event: &KeyboardEvent) -> KeyPress {
    let origin = event
        .composed_path()
        .get(0)
        .dyn_into::<Element>()
        .ok()
        .or_else(|| event.target().and_then(|t| t.dyn_into::<Element>().ok()));

    let target = match origin {
        Some(element) => {
            let editable = element
                .dyn_ref::<HtmlElement>()
                .is_some_and(|e| e.is_content_editable());
            KeyTarget::classify(&element.tag_name(), editable)
        }
        None => KeyTarget::Other,
    };

    KeyPress::new(&event.key()).with_target(target)
}

/// Route every keydown reaching `window` through `controller`. The listener
/// runs in the capture phase, ahead of the page's own handlers.
pub fn bind_keydown<P>(window: &Window, controller: Rc<RefCell<Controller<P>>>) -> Result<(), WebError>
where
    P: Page + 'static,
{
    let listener = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
        let press = key_press_from_event(&event);
        if Controller::dispatch(&controller, &press).is_handled() {
            event.prevent_default();
            event.stop_propagation();
            event.stop_immediate_propagation();
        }
    });

    window.add_event_listener_with_callback_and_bool(
        "keydown",
        listener.as_ref().unchecked_ref(),
        true,
    )?;
    listener.forget();
    Ok(())
}

/// Run `start` once the document has finished loading: now if it already
/// has, otherwise on the window's `load` event.
pub fn when_loaded<F>(window: &Window, start: F) -> Result<(), WebError>
where
    F: FnOnce() + 'static,
{
    let document = window.document().ok_or(WebError::MissingGlobal("document"))?;
    let ready_state = Reflect::get(&document, &JsValue::from_str("readyState"))?;
    if ready_state.as_string().as_deref() == Some("complete") {
        start();
        return Ok(());
    }

    let callback = Closure::once_into_js(start);
    window.add_event_listener_with_callback("load", callback.unchecked_ref())?;
    Ok(())
}
