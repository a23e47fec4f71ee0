//! Helper functions to set groups of AppWindow properties together.
//!
//! Instead of calling individual setters like set_after_width_percent, set_handle_size, etc.,
//! these functions group related properties the same way the slider derives them.

use crate::slider::{Decoration, Geometry, Rgba};

pub fn to_slint_color(color: Rgba) -> slint::Color {
    slint::Color::from_argb_u8(color.a, color.r, color.g, color.b)
}

/// Sets all derived layout properties at once.
///
/// Groups: after-width-*, after-max-width-*, separator-*, handle-*
pub fn set_geometry(ui: &crate::AppWindow, geometry: &Geometry) {
    ui.set_after_width_percent(geometry.after_width.percent as f32);
    ui.set_after_width_offset(geometry.after_width.px as f32);
    ui.set_after_max_width_percent(geometry.after_max_width.percent as f32);
    ui.set_after_max_width_offset(geometry.after_max_width.px as f32);
    ui.set_separator_width(geometry.separator_width as f32);
    ui.set_separator_color(to_slint_color(geometry.separator_color));
    ui.set_handle_left_percent(geometry.handle_left_percent as f32);
    ui.set_handle_size(geometry.handle_size as f32);
    ui.set_handle_stroke_width(geometry.handle_stroke_width as f32);
}

/// Sets the handle shape; `None` clears both paths.
pub fn set_decoration(ui: &crate::AppWindow, decoration: Option<Decoration>) {
    let (fill, stroke) = decoration.map_or(("", ""), |d| (d.fill, d.stroke));
    ui.set_handle_fill_commands(fill.into());
    ui.set_handle_stroke_commands(stroke.into());
}

/// Sets both caption labels; an empty string hides the label.
pub fn set_captions(ui: &crate::AppWindow, before: Option<&str>, after: Option<&str>) {
    ui.set_caption1(before.unwrap_or_default().into());
    ui.set_caption2(after.unwrap_or_default().into());
}

/// Sets the error overlay text; an empty string hides it.
pub fn set_error_message(ui: &crate::AppWindow, message: &str) {
    ui.set_error_message(message.into());
}
