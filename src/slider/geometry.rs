//! Layout values derived from the divider position and style settings.
//!
//! Lengths that depend on the widget width are kept as `percent + px` pairs
//! so the view can resolve them against its current width without a round
//! trip through the controller.

use crate::slider::color::Rgba;

/// Handle stroke width as a fraction of the handle box size.
pub const HANDLE_STROKE_RATIO: f64 = 7.0 / 100.0;

/// A length of the form `percent% + px`, resolved against a reference width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalcLength {
    pub percent: f64,
    pub px: f64,
}

impl CalcLength {
    #[cfg(test)]
    pub fn resolve(&self, reference: f64) -> f64 {
        reference * self.percent / 100.0 + self.px
    }
}

/// Style parameters taken from the configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub separator_width: f64,
    pub separator_color: Rgba,
    pub handle_size: f64,
}

/// Everything the view needs to place the after panel, divider and handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Content width of the after panel, right-anchored.
    pub after_width: CalcLength,
    /// Upper bound for the after panel content width.
    pub after_max_width: CalcLength,
    /// Thickness of the divider, drawn as the after panel's left border.
    pub separator_width: f64,
    pub separator_color: Rgba,
    /// Horizontal center of the handle box.
    pub handle_left_percent: f64,
    pub handle_size: f64,
    pub handle_stroke_width: f64,
}

impl Geometry {
    pub fn derive(position: f64, style: &Style) -> Self {
        Self {
            after_width: CalcLength {
                percent: 100.0 - position,
                px: -style.separator_width / 2.0,
            },
            after_max_width: CalcLength {
                percent: 100.0,
                px: -style.separator_width,
            },
            separator_width: style.separator_width,
            separator_color: style.separator_color,
            handle_left_percent: position,
            handle_size: style.handle_size,
            handle_stroke_width: style.handle_size * HANDLE_STROKE_RATIO,
        }
    }
}

/// Resolution as the view performs it in `image-slider.slint`.
#[cfg(test)]
impl Geometry {
    /// Resolved after panel content width, with min and max constraints applied.
    pub fn after_panel_width(&self, width: f64) -> f64 {
        self.after_width
            .resolve(width)
            .min(self.after_max_width.resolve(width))
            .max(0.0)
    }

    /// Resolved x of the divider's center line.
    pub fn divider_center(&self, width: f64) -> f64 {
        width - self.after_panel_width(width) - self.separator_width / 2.0
    }

    /// Top-left corner of the handle box for a view of the given size.
    pub fn handle_origin(&self, width: f64, height: f64) -> (f64, f64) {
        (
            width * self.handle_left_percent / 100.0 - self.handle_size / 2.0,
            (height - self.handle_size) / 2.0,
        )
    }
}
