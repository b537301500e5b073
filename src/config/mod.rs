use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::DEFAULT_HISTORY_CAPACITY;

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

fn default_history_capacity() -> Option<usize> {
    Some(DEFAULT_HISTORY_CAPACITY)
}

fn default_true() -> bool {
    true
}

/// Application configuration persisted to disk
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfigData {
    /// Maximum number of edits kept for undo; `None` keeps everything
    #[serde(default = "default_history_capacity")]
    pub history_capacity: Option<usize>,

    /// Whether Ctrl+Z / Ctrl+Y drive the edit history
    #[serde(default = "default_true")]
    pub keyboard_shortcuts: bool,

    /// Tracing filter directives used when `RUST_LOG` is unset
    #[serde(default)]
    pub log_filter: Option<String>,
}

impl Default for AppConfigData {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
            keyboard_shortcuts: true,
            log_filter: None,
        }
    }
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct AppConfig {
    /// The persisted configuration data
    pub data: AppConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: AppConfigData::default(),
            config_path: crate::paths::config_file(),
            dirty: false,
        }
    }
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Message to change how many edits the history keeps
#[derive(Message)]
pub struct SetHistoryCapacityRequest {
    pub capacity: Option<usize>,
}

/// Result of loading config from disk
pub struct LoadConfigResult {
    pub data: AppConfigData,
    /// Error message if config was reset to defaults due to an error
    pub reset_reason: Option<String>,
}

/// Load configuration from `path`, falling back to defaults on any error
pub fn load_config(path: &Path) -> LoadConfigResult {
    if !path.exists() {
        info!("No config file found, using defaults");
        return LoadConfigResult {
            data: AppConfigData::default(),
            reset_reason: None,
        };
    }

    let (data, reset_reason) = match std::fs::read_to_string(path) {
        Ok(json) => match serde_json::from_str(&json) {
            Ok(data) => {
                info!("Loaded config from {:?}", path);
                (data, None)
            }
            Err(e) => {
                warn!("Failed to parse config file: {}", e);
                (
                    AppConfigData::default(),
                    Some(format!("Configuration file was corrupted: {}", e)),
                )
            }
        },
        Err(e) => {
            warn!("Failed to read config file: {}", e);
            (
                AppConfigData::default(),
                Some(format!("Could not read configuration file: {}", e)),
            )
        }
    };

    LoadConfigResult { data, reset_reason }
}

/// Save configuration to disk
fn save_config(config: &AppConfig) {
    match serde_json::to_string_pretty(&config.data) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&config.config_path, json) {
                error!("Failed to save config: {}", e);
            } else {
                info!("Config saved to {:?}", config.config_path);
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
        }
    }
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(mut config: ResMut<AppConfig>) {
    let result = load_config(&config.config_path);
    config.data = result.data;
    config.dirty = false;

    if let Some(reason) = result.reset_reason {
        warn!("Config reset to defaults: {}", reason);
    }
}

/// System to save config when requested
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<AppConfig>,
) {
    for _ in events.read() {
        if config.dirty {
            save_config(&config);
            config.dirty = false;
        }
    }
}

/// System to update the history capacity
fn set_history_capacity_system(
    mut events: MessageReader<SetHistoryCapacityRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        if config.data.history_capacity == event.capacity {
            continue;
        }
        config.data.history_capacity = event.capacity;
        config.dirty = true;
        save_events.write(SaveConfigRequest);
        info!("History capacity set to {:?}", event.capacity);
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .add_message::<SaveConfigRequest>()
            .add_message::<SetHistoryCapacityRequest>()
            .add_systems(Startup, load_config_system.in_set(ConfigLoaded))
            .add_systems(
                Update,
                (
                    set_history_capacity_system.run_if(on_message::<SetHistoryCapacityRequest>),
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                )
                    .chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_data_default() {
        let data = AppConfigData::default();
        assert_eq!(data.history_capacity, Some(DEFAULT_HISTORY_CAPACITY));
        assert!(data.keyboard_shortcuts);
        assert!(data.log_filter.is_none());
    }

    #[test]
    fn test_app_config_data_serialization() {
        let data = AppConfigData {
            history_capacity: None,
            keyboard_shortcuts: false,
            log_filter: Some("warn".to_string()),
        };

        let json = serde_json::to_string(&data).unwrap();
        let parsed: AppConfigData = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, data);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let parsed: AppConfigData = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, AppConfigData::default());
    }

    #[test]
    fn test_load_config_missing_file_is_not_a_reset() {
        let result = load_config(Path::new("definitely/not/here/mapforge.json"));
        assert_eq!(result.data, AppConfigData::default());
        assert!(result.reset_reason.is_none());
    }

    #[test]
    fn test_load_config_corrupt_file_resets() {
        let path = std::env::temp_dir().join(format!(
            "mapforge-corrupt-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, "{ not json").unwrap();

        let result = load_config(&path);
        let _ = std::fs::remove_file(&path);

        assert_eq!(result.data, AppConfigData::default());
        assert!(result.reset_reason.unwrap().contains("corrupted"));
    }

    #[test]
    fn test_set_history_capacity_marks_dirty() {
        let mut app = App::new();
        app.insert_resource(AppConfig {
            data: AppConfigData::default(),
            config_path: std::env::temp_dir().join("mapforge-unused.json"),
            dirty: false,
        })
        .add_message::<SaveConfigRequest>()
        .add_message::<SetHistoryCapacityRequest>()
        .add_systems(Update, set_history_capacity_system);

        app.world_mut()
            .write_message(SetHistoryCapacityRequest { capacity: Some(5) });
        app.update();

        let config = app.world().resource::<AppConfig>();
        assert_eq!(config.data.history_capacity, Some(5));
        assert!(config.dirty);
    }

    #[test]
    fn test_capacity_request_reaches_history() {
        use crate::document::MapDocument;
        use crate::history::{EditLog, HistoryPlugin};

        let mut app = App::new();
        app.insert_resource(AppConfig {
            data: AppConfigData::default(),
            config_path: std::env::temp_dir().join("mapforge-unused.json"),
            dirty: false,
        })
        .add_message::<SaveConfigRequest>()
        .add_message::<SetHistoryCapacityRequest>()
        .add_systems(Update, set_history_capacity_system)
        .insert_resource(MapDocument::default())
        .add_plugins(HistoryPlugin::<MapDocument>::default());

        app.update();
        assert_eq!(
            app.world().resource::<EditLog>().capacity(),
            Some(DEFAULT_HISTORY_CAPACITY)
        );

        app.world_mut()
            .write_message(SetHistoryCapacityRequest { capacity: None });
        // The history may pick the change up on the following frame
        app.update();
        app.update();

        assert_eq!(app.world().resource::<EditLog>().capacity(), None);
    }
}
