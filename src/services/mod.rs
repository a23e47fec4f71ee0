//! Service layer for work that runs outside the UI thread.

pub mod config_reload_service;

pub use config_reload_service::{ConfigDebouncer, ConfigReloadService};
