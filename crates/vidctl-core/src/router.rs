//! Keystroke routing.

use tracing::trace;
use vidctl_config::{GenericConfig, RemapTarget};
use vidctl_protocols::{KeyPress, KeyTarget};

use crate::strategy::{Action, GenericStrategy, KeyStrategy, RemapStrategy, SiteMode};

/// What happens to the original keydown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Consumed: default prevented, propagation stopped.
    Handled,
    /// Left for the page.
    PassThrough,
}

impl Disposition {
    pub fn is_handled(self) -> bool {
        self == Disposition::Handled
    }
}

/// Decides what, if anything, a keystroke should do.
#[derive(Debug, Clone)]
pub struct InputRouter {
    generic: GenericStrategy,
    remap_targets: Vec<RemapTarget>,
}

impl InputRouter {
    pub fn new(generic: &GenericConfig, remap_targets: Vec<RemapTarget>) -> Self {
        Self {
            generic: GenericStrategy::new(generic),
            remap_targets,
        }
    }

    pub fn site_mode(&self, location: &str) -> SiteMode {
        SiteMode::detect(location, &self.remap_targets)
    }

    /// The action for `press` on the page at `location`.
    ///
    /// Keys typed into text fields and any key while no video is active are
    /// left alone.
    pub fn route(&self, press: &KeyPress, has_active_video: bool, location: &str) -> Option<Action> {
        if press.target == KeyTarget::TextEntry {
            trace!("Key {:?} aimed at text entry", press.key);
            return None;
        }
        if !has_active_video {
            return None;
        }

        match self.site_mode(location) {
            SiteMode::Generic => self.generic.resolve(&press.key),
            SiteMode::SiteRemap(profile) => RemapStrategy::new(profile).resolve(&press.key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidctl_config::Config;
    use vidctl_protocols::KeyIdentity;

    use crate::strategy::DirectAction;

    const YOUTUBE: &str = "https://www.youtube.com/watch?v=abc";
    const NETFLIX: &str = "https://www.netflix.com/watch/1";

    fn router() -> InputRouter {
        let config = Config::default();
        InputRouter::new(&config.generic, config.remap)
    }

    #[test]
    fn test_generic_routing() {
        let action = router().route(&KeyPress::new("k"), true, YOUTUBE);
        assert_eq!(action, Some(Action::Direct(DirectAction::TogglePlay)));
    }

    #[test]
    fn test_remap_routing() {
        let action = router().route(&KeyPress::new("k"), true, NETFLIX);
        assert_eq!(action, Some(Action::Inject(KeyIdentity::Space)));
    }

    #[test]
    fn test_text_entry_never_routed() {
        let press = KeyPress::new("k").with_target(KeyTarget::TextEntry);
        assert_eq!(router().route(&press, true, YOUTUBE), None);
        assert_eq!(router().route(&press, true, NETFLIX), None);
    }

    #[test]
    fn test_no_active_video() {
        assert_eq!(router().route(&KeyPress::new("k"), false, YOUTUBE), None);
        assert_eq!(router().route(&KeyPress::new("k"), false, NETFLIX), None);
    }

    #[test]
    fn test_site_mode_from_router_targets() {
        let router = InputRouter::new(&Config::default().generic, Vec::new());
        assert_eq!(router.site_mode(NETFLIX), SiteMode::Generic);
        assert_eq!(
            router.route(&KeyPress::new("k"), true, NETFLIX),
            Some(Action::Direct(DirectAction::TogglePlay))
        );
    }

    #[test]
    fn test_disposition() {
        assert!(Disposition::Handled.is_handled());
        assert!(!Disposition::PassThrough.is_handled());
    }
}
