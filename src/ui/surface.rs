//! The slider's view on the Slint AppWindow.

use crate::image_cache::ImageCache;
use crate::runtime::SliderSurface;
use crate::slider::{Bounds, Decoration, Geometry};
use crate::ui::image_display::{
    LoadErrors, SharedLoadErrors, Side, clear_image, load_and_display_image,
};
use crate::ui::state_helpers;
use std::sync::{Arc, Mutex};

/// Renders slider state into AppWindow properties.
///
/// Holds a weak handle, so calls after the window is gone do nothing.
pub struct SlintSurface {
    ui: slint::Weak<crate::AppWindow>,
    cache: Arc<Mutex<ImageCache>>,
    errors: SharedLoadErrors,
}

impl SlintSurface {
    pub fn new(ui: slint::Weak<crate::AppWindow>, cache: Arc<Mutex<ImageCache>>) -> Self {
        Self {
            ui,
            cache,
            errors: Arc::new(Mutex::new(LoadErrors::default())),
        }
    }
}

impl SliderSurface for SlintSurface {
    fn bounds(&self) -> Bounds {
        self.ui
            .upgrade()
            .map(|ui| {
                Bounds::new(
                    ui.get_bounds_x() as f64,
                    ui.get_bounds_y() as f64,
                    ui.get_bounds_width() as f64,
                    ui.get_bounds_height() as f64,
                )
            })
            .unwrap_or_default()
    }

    fn set_geometry(&self, geometry: &Geometry) {
        if let Some(ui) = self.ui.upgrade() {
            state_helpers::set_geometry(&ui, geometry);
        }
    }

    fn set_decoration(&self, decoration: Option<Decoration>) {
        if let Some(ui) = self.ui.upgrade() {
            state_helpers::set_decoration(&ui, decoration);
        }
    }

    fn set_captions(&self, before: Option<&str>, after: Option<&str>) {
        if let Some(ui) = self.ui.upgrade() {
            state_helpers::set_captions(&ui, before, after);
        }
    }

    fn set_sources(&self, before: &str, after: &str) {
        for (side, source) in [(Side::Before, before), (Side::After, after)] {
            load_and_display_image(
                self.ui.clone(),
                side,
                source.to_string(),
                self.cache.clone(),
                self.errors.clone(),
            );
        }
    }

    fn set_dragging(&self, dragging: bool) {
        if let Some(ui) = self.ui.upgrade() {
            ui.set_dragging(dragging);
        }
    }

    fn unmount(&self) {
        if let Some(ui) = self.ui.upgrade() {
            clear_image(&ui, Side::Before, &self.errors);
            clear_image(&ui, Side::After, &self.errors);
            state_helpers::set_captions(&ui, None, None);
            state_helpers::set_decoration(&ui, None);
            ui.set_dragging(false);
        }
    }
}
