//! Layout geometry shared by page backends.

use serde::{Deserialize, Serialize};

/// Rendered box of an element, in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Rect at the origin with the given size.
    pub fn sized(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Both sides strictly larger than `min`.
    pub fn exceeds(&self, min: f64) -> bool {
        self.width > min && self.height > min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area() {
        assert_eq!(Rect::sized(640.0, 360.0).area(), 230_400.0);
        assert_eq!(Rect::default().area(), 0.0);
    }

    #[test]
    fn test_exceeds_is_strict() {
        assert!(Rect::sized(151.0, 151.0).exceeds(150.0));
        assert!(!Rect::sized(150.0, 400.0).exceeds(150.0));
        assert!(!Rect::sized(400.0, 150.0).exceeds(150.0));
    }

    #[test]
    fn test_deserialize_without_origin() {
        let rect: Rect = serde_json::from_str(r#"{"width": 320, "height": 180}"#).unwrap();
        assert_eq!(rect, Rect::sized(320.0, 180.0));
    }
}
