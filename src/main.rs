use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::PathBuf;
use std::sync::Arc;

mod api;
mod app;
mod codec;
mod config;
mod events;
mod logging;
mod models;
mod state;
mod ui;
mod validation;

use api::ZoneClient;
use app::App;
use codec::ZoneFileCodec;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Install color-eyre for better error messages
    color_eyre::install().ok(); // Ignore error if already installed

    let dirs = ProjectDirs::from("com", "zonedit", "zonedit");

    let config_path = match std::env::var_os("ZONEDIT_CONFIG") {
        Some(path) => PathBuf::from(path),
        None => match &dirs {
            Some(dirs) => dirs.config_dir().join("config.toml"),
            None => std::env::current_dir()?.join("zonedit.toml"),
        },
    };
    let log_path = match &dirs {
        Some(dirs) => dirs.data_dir().join("zonedit.log"),
        None => std::env::current_dir()?.join("zonedit.log"),
    };

    let config = config::load_config(&config_path)?;
    logging::init(&config.settings, &log_path)?;
    tracing::info!(config = %config_path.display(), endpoint = %config.server.endpoint, "starting");

    let store = Arc::new(ZoneClient::new(&config.server.endpoint)?);
    let codec = Arc::new(
        ZoneFileCodec::new(&config.server.origin)
            .with_context(|| format!("Invalid zone origin {:?}", config.server.origin))?,
    );

    // Load the zone before taking over the terminal so failures print normally
    let mut app = App::bootstrap(&config, store, codec).await?;

    let terminal = ratatui::init();
    let result = app.run(terminal).await;
    ratatui::restore();

    result
}
