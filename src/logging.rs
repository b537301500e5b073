//! File and stdout logging for the editor process.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::constants::DEFAULT_LOG_FILTER;

const LOG_FILE_NAME: &str = "mapforge.log";

/// Pick the log filter: `RUST_LOG` wins, then the configured filter, then the default
pub fn resolve_filter(configured: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| match configured {
            Some(directives) => EnvFilter::try_new(directives),
            None => EnvFilter::try_new(DEFAULT_LOG_FILTER),
        })
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Set up stdout plus file logging under `logs_dir`.
///
/// Returns the appender guard; keep it alive for the duration of the program
/// or buffered lines are lost. Returns `None` if the directory can't be made.
pub fn setup_logging(logs_dir: &Path, configured_filter: Option<&str>) -> Option<WorkerGuard> {
    if std::fs::create_dir_all(logs_dir).is_err() {
        eprintln!("Failed to create logs directory");
        return None;
    }

    let log_file_path = logs_dir.join(LOG_FILE_NAME);

    // Append session separator to existing log file
    if let Ok(mut file) = OpenOptions::new().append(true).open(&log_file_path) {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let separator = "=".repeat(80);
        let _ = writeln!(
            file,
            "\n\n{}\n=== New Session Started at {} ===\n{}\n",
            separator, timestamp, separator
        );
    }

    let file_appender = tracing_appender::rolling::never(logs_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // No ANSI colors for file output
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_target(true)
        .with_level(true);

    let installed = tracing_subscriber::registry()
        .with(resolve_filter(configured_filter))
        .with(file_layer)
        .with(stdout_layer)
        .try_init();

    if installed.is_err() {
        eprintln!("A global tracing subscriber is already installed");
        return None;
    }

    Some(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_filter_accepts_configured_directives() {
        // RUST_LOG may be set in CI; only check that resolution never panics
        let filter = resolve_filter(Some("warn,mapforge=trace"));
        assert!(!filter.to_string().is_empty());
    }

    #[test]
    fn test_resolve_filter_falls_back_on_garbage() {
        let filter = resolve_filter(Some("=[not a directive"));
        assert!(!filter.to_string().is_empty());
    }
}
