//! Command line handling and mounting the slider into the window.

use crate::config::SliderConfig;
use crate::error::Result;
use crate::runtime::{SliderHandle, SlintScheduler, mount};
use crate::services::{ConfigDebouncer, ConfigReloadService};
use crate::slider::HandleType;
use crate::state::AppState;
use crate::ui::SlintSurface;
use clap::Parser;
use log::{info, warn};
use slint::ComponentHandle;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::mpsc;

/// Compare two images with a draggable divider.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Image shown on the left ("before"): path, file:// or http(s):// URL
    pub src1: Option<String>,
    /// Image revealed on the right ("after")
    pub src2: Option<String>,
    /// TOML file with widget options (camelCase keys)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Reload the config file when it changes
    #[arg(long, requires = "config")]
    pub watch: bool,
    /// Initial divider position in percent
    #[arg(long)]
    pub slider_percent: Option<f64>,
    #[arg(long)]
    pub caption1: Option<String>,
    #[arg(long)]
    pub caption2: Option<String>,
    /// Divider thickness in px
    #[arg(long)]
    pub separator_width: Option<f64>,
    /// Divider and handle color (CSS syntax)
    #[arg(long)]
    pub separator_color: Option<String>,
    /// none, triangles, circle or arrows
    #[arg(long)]
    pub handle_type: Option<String>,
    /// Handle box size in px
    #[arg(long)]
    pub handle_size: Option<f64>,
}

impl Cli {
    /// Command line values take precedence over the config file.
    pub fn apply_overrides(&self, config: &mut SliderConfig) {
        if let Some(src1) = &self.src1 {
            config.src1 = src1.clone();
        }
        if let Some(src2) = &self.src2 {
            config.src2 = src2.clone();
        }
        if let Some(percent) = self.slider_percent {
            config.slider_percent = percent;
        }
        if let Some(caption) = &self.caption1 {
            config.caption1 = caption.clone();
        }
        if let Some(caption) = &self.caption2 {
            config.caption2 = caption.clone();
        }
        if let Some(width) = self.separator_width {
            config.separator_width = width;
        }
        if let Some(color) = &self.separator_color {
            config.separator_color = color.clone();
        }
        if let Some(handle_type) = &self.handle_type {
            config.handle_type = HandleType::parse(handle_type);
        }
        if let Some(size) = self.handle_size {
            config.handle_size = size;
        }
    }

    /// Loads the config file (if any), applies overrides and validates.
    pub fn build_config(&self) -> Result<SliderConfig> {
        let mut config = match &self.config {
            Some(path) => SliderConfig::load(path)?,
            None => SliderConfig::default(),
        };
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }
}

/// Everything that has to stay alive while the window runs.
pub struct Session {
    slider: Rc<SliderHandle<SlintSurface>>,
    _watcher: Option<ConfigDebouncer>,
}

impl Session {
    /// Unmounts the slider and stops watching the config file.
    pub fn shutdown(self) {
        let Session {
            slider,
            _watcher: watcher,
        } = self;
        drop(watcher);
        info!("Final divider position: {:.1}%", slider.position());
        match Rc::try_unwrap(slider) {
            Ok(slider) => slider.destroy(),
            Err(_) => warn!("Slider still referenced at shutdown"),
        }
    }
}

/// Mounts the slider into the window and starts the optional config watcher.
pub fn start(
    app: &crate::AppWindow,
    app_state: &AppState,
    cli: Cli,
    config: SliderConfig,
) -> Result<Session> {
    crate::ui::setup_window_listeners(app, app_state.listeners.clone());

    let surface = SlintSurface::new(app.as_weak(), app_state.image_cache.clone());
    let slider = Rc::new(mount(
        surface,
        config,
        &app_state.listeners,
        Rc::new(SlintScheduler),
    ));

    let (sender, receiver) = mpsc::channel();
    crate::ui::setup_config_reload_handler(app, Rc::downgrade(&slider), receiver);

    let watch_path = cli.config.clone().filter(|_| cli.watch);
    let watcher = match watch_path {
        Some(path) => {
            let ui_handle = app.as_weak();
            let service = ConfigReloadService::new(path.clone());
            info!("Watching {} for changes", path.display());
            Some(service.start_watching(move || match cli.build_config() {
                Ok(config) => {
                    if sender.send(config).is_ok() {
                        let ui_handle = ui_handle.clone();
                        let _ = slint::invoke_from_event_loop(move || {
                            if let Some(ui) = ui_handle.upgrade() {
                                ui.invoke_config_reloaded();
                            }
                        });
                    }
                }
                Err(e) => warn!("Ignoring invalid configuration: {}", e),
            })?)
        }
        None => None,
    };

    Ok(Session {
        slider,
        _watcher: watcher,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_sources_and_flags() {
        let cli = Cli::try_parse_from([
            "slint-image-slider",
            "before.png",
            "after.png",
            "--slider-percent",
            "25",
            "--handle-type",
            "arrows",
            "--separator-color",
            "#00ff00",
        ])
        .unwrap();
        let config = cli.build_config().unwrap();
        assert_eq!(config.src1, "before.png");
        assert_eq!(config.src2, "after.png");
        assert_eq!(config.slider_percent, 25.0);
        assert_eq!(config.handle_type, HandleType::Arrows);
        assert_eq!(config.separator_color, "#00ff00");
        assert_eq!(config.handle_size, 42.0);
    }

    #[test]
    fn missing_sources_fail_validation() {
        let cli = Cli::try_parse_from(["slint-image-slider", "only-one.png"]).unwrap();
        assert!(cli.build_config().is_err());
    }

    #[test]
    fn watch_requires_config() {
        assert!(Cli::try_parse_from(["slint-image-slider", "--watch"]).is_err());
    }

    #[test]
    fn flags_override_config_file() {
        let path = std::env::temp_dir().join("slint-image-slider-startup-test.toml");
        std::fs::write(
            &path,
            "src1 = \"a.png\"\nsrc2 = \"b.png\"\nhandleType = \"circle\"\ncaption1 = \"Old\"\n",
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            "slint-image-slider",
            "--config",
            path.to_str().unwrap(),
            "--caption1",
            "New",
        ])
        .unwrap();
        let config = cli.build_config().unwrap();
        assert_eq!(config.src1, "a.png");
        assert_eq!(config.handle_type, HandleType::Circle);
        assert_eq!(config.caption1, "New");

        let _ = std::fs::remove_file(path);
    }
}
