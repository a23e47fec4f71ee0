//! State shared across the application.

use crate::config::IMAGE_CACHE_CAPACITY;
use crate::image_cache::ImageCache;
use crate::runtime::WindowListeners;
use std::sync::{Arc, Mutex};

/// Application-wide state container.
pub struct AppState {
    /// Window-level input listeners, fed by the winit event hook.
    pub listeners: WindowListeners,
    /// LRU cache for decoded images, shared with loader threads.
    pub image_cache: Arc<Mutex<ImageCache>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            listeners: WindowListeners::new(),
            image_cache: Arc::new(Mutex::new(ImageCache::new(IMAGE_CACHE_CAPACITY))),
        }
    }
}
