//! Application configuration.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Application configuration, loaded from a JSON file when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Storage location for subscribers and token state.
    pub database_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://trendwatch.db".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from a JSON file, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => config,
                Err(err) => {
                    warn!("Ignoring malformed config {}: {}", path, err);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}
