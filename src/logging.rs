use anyhow::{anyhow, Context, Result};
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::config::Settings;

/// Setup logging to a file, since the terminal belongs to the UI.
///
/// `settings.log_file` wins over `default_path`. Use the ZONEDIT_LOG
/// environment variable to override the configured level, e.g.
///   ZONEDIT_LOG=zonedit::state=debug
pub fn init(settings: &Settings, default_path: &Path) -> Result<()> {
    let path = settings.log_file.as_deref().unwrap_or(default_path);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let filter = EnvFilter::try_from_env("ZONEDIT_LOG")
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .with_context(|| format!("Invalid log level: {}", settings.log_level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!(e))
}
