//! Fetching and decoding image sources.
//!
//! Everything here blocks and is meant to run on a rayon worker.

use crate::error::{AppError, Result};
use slint::{Image, Rgba8Pixel, SharedPixelBuffer};
use std::path::PathBuf;
use std::time::Duration;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Decoded RGBA8 pixels, cheap to clone.
pub type DecodedImage = SharedPixelBuffer<Rgba8Pixel>;

/// Where an image source string points to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    File(PathBuf),
    Remote(String),
}

impl ImageSource {
    /// Interprets `http(s)://` as remote, strips `file://`, and treats anything else as a path.
    pub fn parse(source: &str) -> Self {
        let source = source.trim();
        let lower = source.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            ImageSource::Remote(source.to_string())
        } else if lower.starts_with("file://") {
            ImageSource::File(PathBuf::from(&source["file://".len()..]))
        } else {
            ImageSource::File(PathBuf::from(source))
        }
    }
}

/// Loads and decodes an image source.
pub fn load_image_blocking(source: &str) -> Result<DecodedImage> {
    let image = match ImageSource::parse(source) {
        ImageSource::File(path) => image::ImageReader::open(&path)
            .map_err(|e| AppError::ImageLoad(format!("{}: {}", path.display(), e)))?
            .with_guessed_format()?
            .decode()?,
        ImageSource::Remote(url) => {
            let bytes = fetch_remote(&url)?;
            image::load_from_memory(&bytes)?
        }
    };

    let rgba = image.to_rgba8();
    Ok(SharedPixelBuffer::<Rgba8Pixel>::clone_from_slice(
        rgba.as_raw().as_slice(),
        rgba.width(),
        rgba.height(),
    ))
}

fn fetch_remote(url: &str) -> Result<Vec<u8>> {
    let client = reqwest::blocking::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()?;
    let response = client.get(url).send()?.error_for_status()?;
    Ok(response.bytes()?.to_vec())
}

/// Wraps decoded pixels in a Slint image. Must run on the UI thread.
pub fn create_slint_image(buffer: DecodedImage) -> Image {
    Image::from_rgba8(buffer)
}
