// Prevent console window in addition to Slint window in Windows release builds when, e.g., starting the app via file manager. Ignored on other platforms.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

slint::include_modules!();

mod config;
mod error;
mod image_cache;
mod image_loader;
mod runtime;
mod services;
mod slider;
mod startup;
mod state;
mod ui;

use clap::Parser;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(debug_assertions)]
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Debug)
        .init();
    #[cfg(not(debug_assertions))]
    env_logger::init();

    let cli = startup::Cli::parse();
    let config = cli.build_config()?;

    let app = AppWindow::new()?;
    let app_state = state::AppState::new();

    // Mount the slider and hook up window input and config reloads
    let session = startup::start(&app, &app_state, cli, config)?;

    app.run()?;

    session.shutdown();

    Ok(())
}
