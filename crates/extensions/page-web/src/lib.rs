//! Browser page backend for vidctl.
//!
//! Implements the `vidctl-protocols` traits over the live document with
//! `web-sys`, maps the scheduling contract onto `setTimeout`/`setInterval`,
//! and wires a [`Controller`] to the window's keydown events.
//!
//! The crate builds for any target but only does something useful on
//! `wasm32-unknown-unknown` inside a page.

mod binding;
mod console;
mod dom;
mod error;
mod injector;
mod overlay;
mod scheduler;
mod video;

use std::cell::RefCell;
use std::rc::Rc;

use vidctl_config::Config;
use vidctl_core::Controller;

pub use binding::{bind_keydown, key_press_from_event, when_loaded};
pub use console::{ConsoleMakeWriter, ConsoleWriter, install_panic_hook};
pub use dom::{WebPage, WebRoot};
pub use error::WebError;
pub use injector::WindowInjector;
pub use overlay::{WebFeedbackLabel, WebOverlay};
pub use scheduler::BrowserScheduler;
pub use video::WebVideo;

/// Shared handle to the page's controller.
pub type WebController = Rc<RefCell<Controller<WebPage>>>;

/// Build a controller for the current page, start rescanning and listen for
/// keys.
pub fn launch(config: Config) -> Result<WebController, WebError> {
    let page = WebPage::current()?;
    let window = page.window().clone();
    let scheduler = Rc::new(BrowserScheduler::new(window.clone()));

    let controller = Rc::new(RefCell::new(Controller::new(page, config, scheduler)));
    Controller::activate(&controller)?;
    bind_keydown(&window, controller.clone())?;
    Ok(controller)
}
