//! Service for reloading the configuration file when it changes on disk.

use crate::error::{AppError, Result};
use log::{debug, warn};
use notify_debouncer_mini::notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{DebouncedEvent, Debouncer, new_debouncer};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEBOUNCE_TIMEOUT: Duration = Duration::from_millis(300);

/// Keeps the config watcher alive; dropping it stops watching.
pub type ConfigDebouncer = Debouncer<RecommendedWatcher>;

/// Watches a single config file.
pub struct ConfigReloadService {
    path: PathBuf,
}

/// Returns true if any event touches the watched file.
fn touches_file(events: &[DebouncedEvent], path: &Path) -> bool {
    let Some(file_name) = path.file_name() else {
        return false;
    };
    events
        .iter()
        .any(|event| event.path.file_name() == Some(file_name))
}

impl ConfigReloadService {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Starts watching the config file.
    ///
    /// The parent directory is watched (non-recursive) so editors that
    /// replace the file on save are still noticed. `on_change` runs on the
    /// watcher thread once per debounced batch that touches the file.
    pub fn start_watching<F>(&self, on_change: F) -> Result<ConfigDebouncer>
    where
        F: Fn() + Send + 'static,
    {
        let directory = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let path = self.path.clone();

        let mut debouncer = new_debouncer(
            DEBOUNCE_TIMEOUT,
            move |res: notify_debouncer_mini::DebounceEventResult| match res {
                Ok(events) => {
                    if touches_file(&events, &path) {
                        debug!("Config file changed: {}", path.display());
                        on_change();
                    }
                }
                Err(error) => warn!("Config watcher error: {}", error),
            },
        )
        .map_err(|e| AppError::Watch(format!("Failed to create debouncer: {}", e)))?;

        debouncer
            .watcher()
            .watch(&directory, RecursiveMode::NonRecursive)
            .map_err(|e| {
                AppError::Watch(format!("Failed to watch {}: {}", directory.display(), e))
            })?;

        Ok(debouncer)
    }
}
