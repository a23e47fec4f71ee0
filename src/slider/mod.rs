//! Slider widget logic: divider position, drag gestures, derived geometry
//! and handle decorations. Nothing in here touches the UI toolkit.

pub mod color;
pub mod geometry;
pub mod handle;
pub mod position;
pub mod state;

pub use color::Rgba;
pub use geometry::{Geometry, Style};
pub use handle::{Decoration, HandleType};
pub use position::Bounds;
pub use state::{GestureEvent, SliderState, TouchPoint};
