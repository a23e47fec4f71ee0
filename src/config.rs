//! Widget configuration: defaults, TOML loading and validation.

use crate::error::{AppError, Result};
use crate::slider::position::{DEFAULT_PERCENT, clamp_percent};
use crate::slider::{HandleType, Rgba, Style};
use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_SEPARATOR_WIDTH: f64 = 4.0;
pub const DEFAULT_SEPARATOR_COLOR: &str = "white";
pub const DEFAULT_HANDLE_SIZE: f64 = 42.0;

/// Number of decoded images kept in memory.
pub const IMAGE_CACHE_CAPACITY: usize = 8;

/// Construction-time options of the slider widget.
///
/// Keys use the camelCase names of the widget options, e.g.
/// `sliderPercent = 30` or `handleType = "arrows"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SliderConfig {
    pub slider_percent: f64,
    pub src1: String,
    pub src2: String,
    pub caption1: String,
    pub caption2: String,
    pub separator_width: f64,
    pub separator_color: String,
    pub handle_type: HandleType,
    pub handle_size: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            slider_percent: DEFAULT_PERCENT,
            src1: String::new(),
            src2: String::new(),
            caption1: String::new(),
            caption2: String::new(),
            separator_width: DEFAULT_SEPARATOR_WIDTH,
            separator_color: DEFAULT_SEPARATOR_COLOR.to_string(),
            handle_type: HandleType::None,
            handle_size: DEFAULT_HANDLE_SIZE,
        }
    }
}

impl SliderConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads a TOML config file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    /// Checks that both image sources are present.
    pub fn validate(&self) -> Result<()> {
        if self.src1.trim().is_empty() {
            return Err(AppError::Config("src1 is required".to_string()));
        }
        if self.src2.trim().is_empty() {
            return Err(AppError::Config("src2 is required".to_string()));
        }
        Ok(())
    }

    /// Initial divider position, clamped into range.
    pub fn initial_position(&self) -> f64 {
        clamp_percent(self.slider_percent)
    }

    /// Style parameters for geometry derivation.
    ///
    /// Unparseable colors fall back to white; negative or non-finite sizes to zero.
    pub fn style(&self) -> Style {
        let separator_color = Rgba::parse(&self.separator_color).unwrap_or_else(|| {
            warn!(
                "Unrecognized separator color {:?}, using {}",
                self.separator_color, DEFAULT_SEPARATOR_COLOR
            );
            Rgba::WHITE
        });
        Style {
            separator_width: non_negative(self.separator_width),
            separator_color,
            handle_size: non_negative(self.handle_size),
        }
    }

    /// Caption text for each side, `None` when empty.
    pub fn captions(&self) -> (Option<&str>, Option<&str>) {
        fn caption(text: &str) -> Option<&str> {
            (!text.is_empty()).then_some(text)
        }
        (caption(&self.caption1), caption(&self.caption2))
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}
