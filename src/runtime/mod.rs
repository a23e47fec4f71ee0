//! Component lifecycle runtime: mounting, window-level input listeners,
//! deferred rendering and teardown.
//!
//! Everything here is single-threaded and lives on the UI thread.

pub mod instance;
pub mod listeners;
pub mod scheduler;

pub use instance::{SliderHandle, SliderSurface, mount};
pub use listeners::{InputTracker, RawInput, TouchPhase, WindowListeners};
pub use scheduler::SlintScheduler;
