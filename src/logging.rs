//! File-backed `tracing` subscriber.
//!
//! The terminal belongs to the TUI, so everything is written to a log file.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::{LoggingSettings, default_log_path};

/// Environment variable holding a filter directive, e.g. `encore=debug`.
pub const LOG_ENV: &str = "ENCORE_LOG";

/// Where log output goes for `settings`, or `None` when no location can be
/// derived (no `HOME`, no explicit file).
pub fn log_path(settings: &LoggingSettings) -> Option<PathBuf> {
    settings.file.clone().or_else(default_log_path)
}

fn filter(settings: &LoggingSettings) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::try_new(&settings.level).unwrap_or_else(|_| EnvFilter::new("info"))
    })
}

/// Install the global subscriber. Returns the log file in use.
pub fn init(
    settings: &LoggingSettings,
) -> Result<Option<PathBuf>, Box<dyn std::error::Error + Send + Sync>> {
    let Some(path) = log_path(settings) else {
        return Ok(None);
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter(settings))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()?;

    Ok(Some(path))
}
