//! Handle decoration variants and their vector shapes.
//!
//! Shapes are SVG path commands in a 100x100 view box. Filled and stroked
//! parts are kept apart because the view paints them with separate paths.

use log::debug;
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum HandleType {
    #[default]
    None,
    Triangles,
    Circle,
    Arrows,
}

/// Path commands for one decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoration {
    pub fill: &'static str,
    pub stroke: &'static str,
}

const TRIANGLES: Decoration = Decoration {
    fill: "M 30 20 L 0 50 L 30 80 Z M 70 20 L 100 50 L 70 80 Z",
    stroke: "",
};

const CIRCLE: Decoration = Decoration {
    fill: "M 30 40 L 20 50 L 30 60 Z M 70 40 L 80 50 L 70 60 Z",
    stroke: "M 5 50 A 45 45 0 1 1 95 50 A 45 45 0 1 1 5 50 Z",
};

const ARROWS: Decoration = Decoration {
    fill: "M 6.5 50 A 3.5 3.5 0 1 1 13.5 50 A 3.5 3.5 0 1 1 6.5 50 Z \
           M 86.5 50 A 3.5 3.5 0 1 1 93.5 50 A 3.5 3.5 0 1 1 86.5 50 Z",
    stroke: "M 30 30 L 10 50 L 30 70 M 70 30 L 90 50 L 70 70",
};

impl HandleType {
    /// Maps a configuration value to a variant. Values must match exactly;
    /// anything else maps to `None`.
    pub fn parse(value: &str) -> Self {
        match value {
            "none" | "" => HandleType::None,
            "triangles" => HandleType::Triangles,
            "circle" => HandleType::Circle,
            "arrows" => HandleType::Arrows,
            other => {
                debug!("Unknown handle type {:?}, rendering no handle", other);
                HandleType::None
            }
        }
    }

    /// Shape to render, `None` for no decoration.
    pub fn decoration(self) -> Option<Decoration> {
        match self {
            HandleType::None => None,
            HandleType::Triangles => Some(TRIANGLES),
            HandleType::Circle => Some(CIRCLE),
            HandleType::Arrows => Some(ARROWS),
        }
    }
}

impl From<String> for HandleType {
    fn from(value: String) -> Self {
        HandleType::parse(&value)
    }
}

impl fmt::Display for HandleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandleType::None => "none",
            HandleType::Triangles => "triangles",
            HandleType::Circle => "circle",
            HandleType::Arrows => "arrows",
        };
        f.write_str(name)
    }
}
