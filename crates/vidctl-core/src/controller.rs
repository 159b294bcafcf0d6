//! The per-page controller.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info, trace, warn};
use vidctl_config::Config;
use vidctl_protocols::{KeyInjector, KeyPress, Page, SyntheticKey};
use vidctl_runloop::{Scheduler, TimerId};

use crate::error::CoreError;
use crate::feedback::FeedbackPresenter;
use crate::indicator::PresenceIndicator;
use crate::playback::apply_direct;
use crate::router::{Disposition, InputRouter};
use crate::selector::Selector;
use crate::strategy::Action;
use crate::tracker::{SelectionChange, Tracker};

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// Built, rescans not yet scheduled.
    Created,
    /// Rescanning and handling keys.
    Active,
}

/// Everything the controls need for one page, owned in one place.
///
/// The browser binding keeps the controller in an `Rc<RefCell<_>>` shared by
/// the rescan timer and the keydown listener.
pub struct Controller<P: Page> {
    page: P,
    config: Config,
    scheduler: Rc<dyn Scheduler>,
    router: InputRouter,
    tracker: Tracker<P::Video>,
    presenter: FeedbackPresenter<P::Video>,
    injector: Rc<dyn KeyInjector>,
    state: ControllerState,
    scan_timer: Option<TimerId>,
}

impl<P: Page + 'static> Controller<P> {
    /// Build the controller and its overlays.
    ///
    /// An overlay the page fails to create is logged and left out; the
    /// controls keep working without it.
    pub fn new(page: P, config: Config, scheduler: Rc<dyn Scheduler>) -> Self {
        let overlay = page
            .create_indicator()
            .map_err(|e| warn!("Indicator unavailable: {}", e))
            .ok();
        let label = page
            .create_feedback_label()
            .map_err(|e| warn!("Feedback label unavailable: {}", e))
            .ok();

        let indicator = PresenceIndicator::new(overlay, config.timing.indicator_hide());
        let tracker = Tracker::new(Selector::from_config(&config.selection), indicator);
        let presenter = FeedbackPresenter::new(label, config.timing.feedback_hide());
        let router = InputRouter::new(&config.generic, config.remap.clone());
        let injector = page.key_injector();

        Self {
            page,
            config,
            scheduler,
            router,
            tracker,
            presenter,
            injector,
            state: ControllerState::Created,
            scan_timer: None,
        }
    }

    /// Start the periodic rescan. The first scan runs one interval from now.
    pub fn activate(controller: &Rc<RefCell<Self>>) -> Result<(), CoreError> {
        let (scheduler, interval) = {
            let this = controller.borrow();
            if this.state == ControllerState::Active {
                return Err(CoreError::AlreadyActive);
            }
            (this.scheduler.clone(), this.config.timing.scan_interval())
        };

        let weak = Rc::downgrade(controller);
        let id = scheduler.schedule_repeating(
            interval,
            Box::new(move || {
                let Some(controller) = weak.upgrade() else {
                    return;
                };
                match controller.try_borrow_mut() {
                    Ok(mut controller) => {
                        controller.tick();
                    }
                    Err(_) => debug!("Controller busy, rescan skipped"),
                }
            }),
        )?;

        let mut this = controller.borrow_mut();
        this.scan_timer = Some(id);
        this.state = ControllerState::Active;
        info!("Universal Video Controls: script injected and running");
        Ok(())
    }

    /// Hand a keydown to `controller` as an event listener would.
    ///
    /// A keydown that arrives while the controller is already busy, such as
    /// one dispatched by the controller's own key injection, passes through.
    pub fn dispatch(controller: &Rc<RefCell<Self>>, press: &KeyPress) -> Disposition {
        match controller.try_borrow_mut() {
            Ok(mut controller) => controller.handle_key(press),
            Err(_) => {
                trace!("Controller busy, key {:?} passed through", press.key);
                Disposition::PassThrough
            }
        }
    }

    /// Rescan the page now.
    pub fn tick(&mut self) -> SelectionChange {
        self.tracker.tick(&self.page, self.scheduler.as_ref())
    }

    /// Handle a keydown. The caller suppresses the event when this returns
    /// [`Disposition::Handled`].
    pub fn handle_key(&mut self, press: &KeyPress) -> Disposition {
        let active = self.tracker.active().cloned();
        let location = self.page.location();
        let Some(action) = self.router.route(press, active.is_some(), &location) else {
            return Disposition::PassThrough;
        };

        match action {
            Action::Direct(direct) => {
                let Some(video) = active else {
                    return Disposition::PassThrough;
                };
                let scheduler = self.scheduler.as_ref();
                let Some(feedback) = apply_direct(&self.page, &video, direct, scheduler) else {
                    return Disposition::PassThrough;
                };
                self.presenter.show(scheduler, Some(&video), &feedback);
            }
            Action::Inject(key) => {
                let key = key.dom_key();
                debug!("Remapping to native '{}' event", key);
                if let Err(e) = self.injector.inject(&SyntheticKey::keydown(key)) {
                    warn!("Key remap failed: {}", e);
                }
            }
        }
        Disposition::Handled
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tracker(&self) -> &Tracker<P::Video> {
        &self.tracker
    }

    pub fn active_video(&self) -> Option<&P::Video> {
        self.tracker.active()
    }

    /// The repeating rescan timer, once active.
    pub fn scan_timer(&self) -> Option<TimerId> {
        self.scan_timer
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
