//! Centralized constants used across the crate.

/// Default device viewport width in pixels
pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1600.0;

/// Default device viewport height in pixels
pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 900.0;

/// Number of edits kept in the history when the config does not override it
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Number of failed-edit diagnostics kept for display
pub const MAX_RECENT_DIAGNOSTICS: usize = 20;

/// File name of the persisted configuration
pub const CONFIG_FILE_NAME: &str = "mapforge.json";

/// Log filter used when neither `RUST_LOG` nor the config provides one
pub const DEFAULT_LOG_FILTER: &str = "info,mapforge=debug";
