//! Per-site key tables.

use tracing::debug;
use url::Url;
use vidctl_config::{GenericConfig, RemapProfile, RemapTarget};
use vidctl_protocols::KeyIdentity;

/// Playback change applied straight to the video element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DirectAction {
    TogglePlay,
    /// Relative seek in seconds.
    Seek(f64),
    ToggleMute,
    ToggleFullscreen,
    /// Relative volume change.
    Volume(f64),
    /// Jump to `digit * 10` percent of the duration.
    SeekToDigit(u8),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Direct(DirectAction),
    /// Re-dispatch as a native keydown carrying this key.
    Inject(KeyIdentity),
}

/// Maps a key to an action, or leaves it alone.
pub trait KeyStrategy {
    fn resolve(&self, key: &KeyIdentity) -> Option<Action>;
}

/// Direct manipulation of the video element.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericStrategy {
    short_seek: f64,
    long_seek: f64,
    volume_step: f64,
}

impl GenericStrategy {
    pub fn new(config: &GenericConfig) -> Self {
        Self {
            short_seek: config.short_seek_secs,
            long_seek: config.long_seek_secs,
            volume_step: config.volume_step,
        }
    }
}

impl Default for GenericStrategy {
    fn default() -> Self {
        Self::new(&GenericConfig::default())
    }
}

impl KeyStrategy for GenericStrategy {
    fn resolve(&self, key: &KeyIdentity) -> Option<Action> {
        if let Some(digit) = key.digit() {
            return Some(Action::Direct(DirectAction::SeekToDigit(digit)));
        }
        let action = match key {
            KeyIdentity::Char('s' | 'k') => DirectAction::TogglePlay,
            KeyIdentity::Char('a') => DirectAction::Seek(-self.short_seek),
            KeyIdentity::Char('d') => DirectAction::Seek(self.short_seek),
            KeyIdentity::Char('j') => DirectAction::Seek(-self.long_seek),
            KeyIdentity::Char('l') => DirectAction::Seek(self.long_seek),
            KeyIdentity::Char('m') => DirectAction::ToggleMute,
            KeyIdentity::Char('f') => DirectAction::ToggleFullscreen,
            KeyIdentity::ArrowUp => DirectAction::Volume(self.volume_step),
            KeyIdentity::ArrowDown => DirectAction::Volume(-self.volume_step),
            _ => return None,
        };
        Some(Action::Direct(action))
    }
}

/// Hands keys to the site's own player under its native bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemapStrategy {
    profile: RemapProfile,
}

impl RemapStrategy {
    pub fn new(profile: RemapProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> RemapProfile {
        self.profile
    }
}

impl KeyStrategy for RemapStrategy {
    fn resolve(&self, key: &KeyIdentity) -> Option<Action> {
        let native = match self.profile {
            RemapProfile::Netflix => match key {
                KeyIdentity::Char('s' | 'k') => KeyIdentity::Space,
                KeyIdentity::Char('a' | 'j') => KeyIdentity::ArrowLeft,
                KeyIdentity::Char('d' | 'l') => KeyIdentity::ArrowRight,
                KeyIdentity::Char(c @ ('m' | 'f')) => KeyIdentity::Char(*c),
                _ => return None,
            },
        };
        Some(Action::Inject(native))
    }
}

/// How keys are handled on the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteMode {
    Generic,
    SiteRemap(RemapProfile),
}

impl SiteMode {
    /// Mode for a page URL. URLs without a host are generic.
    pub fn detect(location: &str, targets: &[RemapTarget]) -> Self {
        let Ok(url) = Url::parse(location) else {
            debug!("Unparseable page location {:?}", location);
            return SiteMode::Generic;
        };
        let Some(host) = url.host_str() else {
            return SiteMode::Generic;
        };
        targets
            .iter()
            .find(|target| target.matches(host))
            .map_or(SiteMode::Generic, |target| SiteMode::SiteRemap(target.profile))
    }
}

#[cfg(test)]
#[path = "strategy_tests.rs"]
mod tests;
