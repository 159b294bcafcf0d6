//! Keyboard input types and the key injection seam.

use crate::error::InjectError;

/// Normalized identity of a pressed key.
///
/// Built from `KeyboardEvent.key`; letters are lower-cased so bindings match
/// regardless of Shift or Caps Lock.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyIdentity {
    /// A single printable character other than space.
    Char(char),
    Space,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    /// Any other named key ("enter", "f5", "shift", ...), lower-cased.
    Named(String),
}

impl KeyIdentity {
    /// Parse a DOM key value.
    pub fn parse(key: &str) -> Self {
        if key == " " {
            return KeyIdentity::Space;
        }

        let mut chars = key.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return match c.to_lowercase().next() {
                Some(lower) => KeyIdentity::Char(lower),
                None => KeyIdentity::Char(c),
            };
        }

        match key.to_lowercase().as_str() {
            "arrowup" | "up" => KeyIdentity::ArrowUp,
            "arrowdown" | "down" => KeyIdentity::ArrowDown,
            "arrowleft" | "left" => KeyIdentity::ArrowLeft,
            "arrowright" | "right" => KeyIdentity::ArrowRight,
            "space" | "spacebar" => KeyIdentity::Space,
            other => KeyIdentity::Named(other.to_string()),
        }
    }

    /// The digit value for keys `0`..=`9`.
    pub fn digit(&self) -> Option<u8> {
        match self {
            KeyIdentity::Char(c) => c.to_digit(10).map(|d| d as u8),
            _ => None,
        }
    }

    /// The `KeyboardEvent.key` value a browser would report for this key.
    pub fn dom_key(&self) -> String {
        match self {
            KeyIdentity::Char(c) => c.to_string(),
            KeyIdentity::Space => " ".to_string(),
            KeyIdentity::ArrowUp => "ArrowUp".to_string(),
            KeyIdentity::ArrowDown => "ArrowDown".to_string(),
            KeyIdentity::ArrowLeft => "ArrowLeft".to_string(),
            KeyIdentity::ArrowRight => "ArrowRight".to_string(),
            KeyIdentity::Named(name) => name.clone(),
        }
    }
}

/// What the keystroke was aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTarget {
    /// A control that accepts typed text.
    TextEntry,
    Other,
}

impl KeyTarget {
    /// Classify an event target from its tag name and editability.
    ///
    /// Every `<input>` counts as text entry, whatever its type.
    pub fn classify(tag_name: &str, content_editable: bool) -> Self {
        if content_editable
            || tag_name.eq_ignore_ascii_case("input")
            || tag_name.eq_ignore_ascii_case("textarea")
        {
            KeyTarget::TextEntry
        } else {
            KeyTarget::Other
        }
    }
}

/// A keydown as seen by the input router.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyPress {
    pub key: KeyIdentity,
    pub target: KeyTarget,
}

impl KeyPress {
    /// A key press on a non-text target.
    pub fn new(key: &str) -> Self {
        Self {
            key: KeyIdentity::parse(key),
            target: KeyTarget::Other,
        }
    }

    pub fn with_target(mut self, target: KeyTarget) -> Self {
        self.target = target;
        self
    }
}

/// Synthetic keydown handed to a [`KeyInjector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticKey {
    pub key: String,
    pub bubbles: bool,
    pub cancelable: bool,
}

impl SyntheticKey {
    /// A bubbling, cancelable keydown carrying `key`.
    pub fn keydown(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            bubbles: true,
            cancelable: true,
        }
    }
}

/// Delivers synthetic key presses to the page's own handlers.
///
/// Isolated so a host's remapping can be swapped or disabled without touching
/// the router's dispatch tables.
pub trait KeyInjector {
    fn inject(&self, key: &SyntheticKey) -> Result<(), InjectError>;
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
