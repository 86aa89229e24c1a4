use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::schema::ZoneditConfig;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<ZoneditConfig> {
    if !path.exists() {
        // If config doesn't exist, create a default one
        let config = ZoneditConfig::default();
        save_config(path, &config)?;
        return Ok(config);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: ZoneditConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}

/// Save configuration to a TOML file
pub fn save_config(path: &Path, config: &ZoneditConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }

    let content = toml::to_string_pretty(config)
        .context("Failed to serialize config to TOML")?;

    fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    Ok(())
}
