//! Periodic rescans and the active selection.

use tracing::debug;
use vidctl_protocols::{Page, VideoElement};
use vidctl_runloop::Scheduler;

use crate::indicator::PresenceIndicator;
use crate::scanner::scan_videos;
use crate::selector::Selector;

/// Outcome of one rescan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    /// A video was selected after a scan that found none.
    Acquired,
    /// A different video replaced the previous one.
    Switched,
    Unchanged,
    /// The previous video no longer qualifies and nothing else does.
    Lost,
    /// Still nothing to control.
    Empty,
}

impl SelectionChange {
    /// Whether the selection now holds a video it did not hold before.
    pub fn is_new_video(self) -> bool {
        matches!(self, SelectionChange::Acquired | SelectionChange::Switched)
    }
}

/// The video under control and the one selected by the scan before.
#[derive(Debug, Clone)]
pub struct ActiveSelection<V> {
    current: Option<V>,
    previous: Option<V>,
}

impl<V: VideoElement> ActiveSelection<V> {
    pub fn new() -> Self {
        Self {
            current: None,
            previous: None,
        }
    }

    pub fn current(&self) -> Option<&V> {
        self.current.as_ref()
    }

    pub fn previous(&self) -> Option<&V> {
        self.previous.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    /// Record the latest scan result.
    pub fn update(&mut self, next: Option<V>) -> SelectionChange {
        let previous = self.current.take();
        let change = match (&previous, &next) {
            (None, None) => SelectionChange::Empty,
            (Some(_), None) => SelectionChange::Lost,
            (None, Some(_)) => SelectionChange::Acquired,
            (Some(old), Some(new)) if old == new => SelectionChange::Unchanged,
            (Some(_), Some(_)) => SelectionChange::Switched,
        };
        self.previous = previous;
        self.current = next;
        change
    }
}

impl<V: VideoElement> Default for ActiveSelection<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Rescans the page and keeps the indicator in step with the selection.
pub struct Tracker<V> {
    selector: Selector,
    selection: ActiveSelection<V>,
    indicator: PresenceIndicator,
    ticks: u64,
}

impl<V: VideoElement> Tracker<V> {
    pub fn new(selector: Selector, indicator: PresenceIndicator) -> Self {
        Self {
            selector,
            selection: ActiveSelection::new(),
            indicator,
            ticks: 0,
        }
    }

    pub fn selection(&self) -> &ActiveSelection<V> {
        &self.selection
    }

    pub fn active(&self) -> Option<&V> {
        self.selection.current()
    }

    pub fn indicator(&self) -> &PresenceIndicator {
        &self.indicator
    }

    /// Number of rescans so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Rescan `page` and update the selection and the indicator.
    pub fn tick<P>(&mut self, page: &P, scheduler: &dyn Scheduler) -> SelectionChange
    where
        P: Page<Video = V>,
    {
        self.ticks += 1;
        let best = self.selector.select(scan_videos(page));
        let change = self.selection.update(best);

        match change {
            SelectionChange::Acquired | SelectionChange::Switched => {
                debug!("Active video {:?}: {:?}", change, self.selection.current());
                self.indicator.flash(scheduler);
            }
            SelectionChange::Lost | SelectionChange::Empty => {
                if change == SelectionChange::Lost {
                    debug!("Active video lost");
                }
                self.indicator.hide_now(scheduler);
            }
            SelectionChange::Unchanged => {}
        }
        change
    }
}

#[cfg(test)]
#[path = "tracker_tests.rs"]
mod tests;
