//! Image loading and display logic.
//!
//! Uses `rayon::spawn` for fetching and decoding,
//! then `slint::invoke_from_event_loop` to update UI from the background thread.

use crate::image_cache::ImageCache;
use crate::image_loader::{self, DecodedImage};
use crate::ui::state_helpers::set_error_message;
use log::{debug, error};
use std::sync::{Arc, Mutex};

/// Which of the two compared images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Before,
    After,
}

impl Side {
    fn label(self) -> &'static str {
        match self {
            Side::Before => "before",
            Side::After => "after",
        }
    }

    /// Source the UI currently wants on this side.
    pub fn current_source(self, ui: &crate::AppWindow) -> slint::SharedString {
        match self {
            Side::Before => ui.get_before_source(),
            Side::After => ui.get_after_source(),
        }
    }

    fn set_source(self, ui: &crate::AppWindow, source: &str) {
        match self {
            Side::Before => ui.set_before_source(source.into()),
            Side::After => ui.set_after_source(source.into()),
        }
    }

    fn set_image(self, ui: &crate::AppWindow, image: slint::Image) {
        match self {
            Side::Before => ui.set_before_image(image),
            Side::After => ui.set_after_image(image),
        }
    }
}

/// Load failures per side.
///
/// Both sides load independently, so a success on one side must not hide the
/// other side's failure.
#[derive(Debug, Default)]
pub struct LoadErrors {
    before: Option<String>,
    after: Option<String>,
}

impl LoadErrors {
    fn slot(&mut self, side: Side) -> &mut Option<String> {
        match side {
            Side::Before => &mut self.before,
            Side::After => &mut self.after,
        }
    }

    pub fn set(&mut self, side: Side, message: String) {
        *self.slot(side) = Some(message);
    }

    pub fn clear(&mut self, side: Side) {
        *self.slot(side) = None;
    }

    /// Combined message for the error overlay, empty when both sides loaded.
    pub fn message(&self) -> String {
        [self.before.as_deref(), self.after.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub type SharedLoadErrors = Arc<Mutex<LoadErrors>>;

fn update_errors(
    ui: &crate::AppWindow,
    errors: &SharedLoadErrors,
    update: impl FnOnce(&mut LoadErrors),
) {
    if let Ok(mut errors) = errors.lock() {
        update(&mut errors);
        set_error_message(ui, &errors.message());
    }
}

/// Shows decoded pixels if they still belong to the side's current source.
fn apply_loaded_image(
    ui: &crate::AppWindow,
    side: Side,
    source: &str,
    buffer: DecodedImage,
    errors: &SharedLoadErrors,
) {
    if side.current_source(ui) != source {
        debug!("Discarding stale {} image: {}", side.label(), source);
        return;
    }
    side.set_image(ui, image_loader::create_slint_image(buffer));
    update_errors(ui, errors, |e| e.clear(side));
}

/// Clears a side back to an empty image and forgets its source.
pub fn clear_image(ui: &crate::AppWindow, side: Side, errors: &SharedLoadErrors) {
    side.set_source(ui, "");
    side.set_image(ui, slint::Image::default());
    update_errors(ui, errors, |e| e.clear(side));
}

/// Helper function to load an image in a background thread and update UI.
///
/// This function:
/// 1. Records the requested source on the UI so late results can be discarded
/// 2. Checks the cache first for instant display
/// 3. If cache miss, spawns a rayon thread to fetch and decode the image
/// 4. Uses invoke_from_event_loop to return to the UI thread
/// 5. Shows the image, or an empty image and an error message
pub fn load_and_display_image(
    ui_handle: slint::Weak<crate::AppWindow>,
    side: Side,
    source: String,
    cache: Arc<Mutex<ImageCache>>,
    errors: SharedLoadErrors,
) {
    let Some(ui) = ui_handle.upgrade() else {
        return;
    };

    if side.current_source(&ui) == source.as_str() {
        return;
    }
    side.set_source(&ui, &source);
    side.set_image(&ui, slint::Image::default());
    update_errors(&ui, &errors, |e| e.clear(side));

    if source.trim().is_empty() {
        return;
    }

    let cached = cache.lock().ok().and_then(|mut c| c.get(&source));
    if let Some(buffer) = cached {
        apply_loaded_image(&ui, side, &source, buffer, &errors);
        return;
    }

    rayon::spawn(move || {
        let result = image_loader::load_image_blocking(&source);

        if let Ok(buffer) = &result {
            if let Ok(mut cache) = cache.lock() {
                cache.put(source.clone(), buffer.clone());
            }
        }

        let _ = slint::invoke_from_event_loop(move || {
            if let Some(ui) = ui_handle.upgrade() {
                match result {
                    Ok(buffer) => apply_loaded_image(&ui, side, &source, buffer, &errors),
                    Err(e) => {
                        // broken image stays in place
                        if side.current_source(&ui) == source.as_str() {
                            let message = format!("Failed to load {} image: {}", side.label(), e);
                            error!("{}", message);
                            update_errors(&ui, &errors, |errors| errors.set(side, message));
                        }
                    }
                }
            }
        });
    });
}
