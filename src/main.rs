mod demo;

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use mapforge::config::ConfigPlugin;
use mapforge::constants::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};
use mapforge::document::MapDocument;
use mapforge::history::HistoryPlugin;
use mapforge::presentation::EditMenuPlugin;
use mapforge::paths;

/// Set up file logging for debug builds
#[cfg(debug_assertions)]
fn setup_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    // The log filter lives in the config, which the ConfigPlugin only loads
    // at Startup; read it early here
    let config = mapforge::config::load_config(&paths::config_file());
    mapforge::logging::setup_logging(&paths::logs_dir(), config.data.log_filter.as_deref())
}

#[cfg(not(debug_assertions))]
fn setup_logging() -> Option<()> {
    None
}

fn main() {
    if let Err(e) = paths::ensure_directories() {
        eprintln!("Failed to create application directories: {}", e);
    }

    // Keep the guard alive for the duration of the program
    let _log_guard = setup_logging();
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "mapforge".into(),
                resolution: (DEFAULT_VIEWPORT_WIDTH as u32, DEFAULT_VIEWPORT_HEIGHT as u32).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin::default())
        .add_plugins(ConfigPlugin)
        .add_plugins(HistoryPlugin::<MapDocument>::default())
        .add_plugins(EditMenuPlugin)
        .add_plugins(demo::DemoPlugin)
        .run();
}
