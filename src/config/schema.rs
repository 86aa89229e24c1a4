use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneditConfig {
    pub version: String,
    pub server: ServerConfig,
    pub settings: Settings,
}

/// Where the zone lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub endpoint: String,
    /// Origin of the zone being edited, e.g. `user.example.com.`
    pub origin: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Delay before reloading the zone after a network failure.
    #[serde(default = "default_reload_delay")]
    pub reload_delay_seconds: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_reload_delay() -> u64 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ZoneditConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            server: ServerConfig::default(),
            settings: Settings::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8000".to_string(),
            origin: "example.com.".to_string(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reload_delay_seconds: default_reload_delay(),
            log_file: None,
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    pub fn reload_delay(&self) -> Duration {
        Duration::from_secs(self.reload_delay_seconds)
    }
}
