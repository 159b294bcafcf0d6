//! Main video selection.

use vidctl_config::SelectionConfig;
use vidctl_protocols::VideoElement;

/// Picks the largest rendered video.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selector {
    min_dimension: f64,
}

impl Selector {
    /// `min_dimension` is exclusive: both sides must be strictly larger.
    pub fn new(min_dimension: f64) -> Self {
        Self { min_dimension }
    }

    pub fn from_config(config: &SelectionConfig) -> Self {
        Self::new(config.min_dimension_px)
    }

    pub fn min_dimension(&self) -> f64 {
        self.min_dimension
    }

    /// Rendered, with both sides above the threshold.
    pub fn qualifies<V: VideoElement>(&self, video: &V) -> bool {
        video.has_layout_parent() && video.bounding_rect().exceeds(self.min_dimension)
    }

    /// The qualifying candidate with the largest rendered area. Ties keep
    /// the earlier candidate.
    pub fn select<V, I>(&self, candidates: I) -> Option<V>
    where
        V: VideoElement,
        I: IntoIterator<Item = V>,
    {
        let mut best: Option<(f64, V)> = None;
        for video in candidates {
            if !video.has_layout_parent() {
                continue;
            }
            let rect = video.bounding_rect();
            if !rect.exceeds(self.min_dimension) {
                continue;
            }
            let area = rect.area();
            if best.as_ref().is_none_or(|(best_area, _)| area > *best_area) {
                best = Some((area, video));
            }
        }
        best.map(|(_, video)| video)
    }
}

impl Default for Selector {
    fn default() -> Self {
        Self::from_config(&SelectionConfig::default())
    }
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod tests;
