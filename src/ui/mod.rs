//! UI module binding the slider to the Slint AppWindow.
//!
//! Threading model:
//! - UI thread: all slider state, window input handling and rendering
//! - `rayon::spawn`: fetching and decoding image sources
//! - `slint::invoke_from_event_loop`: returning decoded images and reloaded configs to the UI thread

pub mod handlers;
pub mod image_display;
mod state_helpers;
pub mod surface;

pub use handlers::{setup_config_reload_handler, setup_window_listeners};
pub use surface::SlintSurface;
