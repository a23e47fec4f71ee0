//! Image cache for switching sources without decoding again.
//!
//! Caches decoded RGBA8 pixels keyed by source string using an LRU policy.

use crate::image_loader::DecodedImage;
use lru::LruCache;
use std::num::NonZeroUsize;

/// LRU cache for storing decoded images.
pub struct ImageCache {
    cache: LruCache<String, DecodedImage>,
}

impl ImageCache {
    /// Creates a new image cache with the specified capacity (at least one entry).
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: LruCache::new(NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)),
        }
    }

    /// Retrieves an image from the cache if it exists.
    pub fn get(&mut self, source: &str) -> Option<DecodedImage> {
        let result = self.cache.get(source).cloned();
        if result.is_some() {
            log::debug!("Cache HIT: {}", source);
        } else {
            log::debug!("Cache MISS: {}", source);
        }
        result
    }

    /// Stores an image in the cache.
    pub fn put(&mut self, source: String, image: DecodedImage) {
        log::info!(
            "Cache PUT: {} ({}x{})",
            source,
            image.width(),
            image.height()
        );
        self.cache.put(source, image);
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.cache.len()
    }
}
