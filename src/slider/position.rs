//! Pointer coordinate to divider percentage conversion.

/// Lowest divider position, in percent of the bounds width.
pub const MIN_PERCENT: f64 = 0.0;
/// Highest divider position, in percent of the bounds width.
pub const MAX_PERCENT: f64 = 100.0;
/// Divider position used when nothing else is configured.
pub const DEFAULT_PERCENT: f64 = 50.0;

/// Rectangle of the interactive overlay in window coordinates (logical px).
///
/// Queried from the view each time a position is computed, since layout can
/// change between two events.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Returns true if the point lies inside the rectangle (right and bottom edges excluded).
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x < self.left + self.width && y >= self.top && y < self.top + self.height
    }

    /// Converts an absolute X coordinate into a clamped divider percentage.
    ///
    /// Returns `None` for a degenerate (zero, negative or NaN) width, in which
    /// case the caller keeps its previous position.
    pub fn percent_at(&self, x: f64) -> Option<f64> {
        if self.width.is_nan() || self.width <= 0.0 {
            return None;
        }
        let percent = (x - self.left) / self.width * 100.0;
        if percent.is_nan() {
            return None;
        }
        Some(clamp_percent(percent))
    }
}

/// Clamps a percentage into `[0, 100]`; NaN becomes the default position.
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        DEFAULT_PERCENT
    } else {
        value.clamp(MIN_PERCENT, MAX_PERCENT)
    }
}
