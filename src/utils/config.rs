//! Configuration management for aniplay
//!
//! Handles loading and saving the application configuration as JSON in the
//! platform configuration directory. Loading is best-effort: a missing or
//! unreadable file yields the defaults.

use crate::player::PlayerOptions;
use crate::utils::error::{IntoPlayerError, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Player behavior tunables
    pub player: PlayerOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            player: PlayerOptions::default(),
        }
    }
}

impl Config {
    /// Load the configuration from the default location, falling back to
    /// defaults if the file does not exist or cannot be parsed.
    pub fn load_or_default() -> Self {
        match std::fs::read_to_string(Self::config_file_path()) {
            Ok(data) => match serde_json::from_str::<Config>(&data) {
                Ok(config) => {
                    info!("Loaded configuration from disk");
                    config
                }
                Err(_) => Config::default(),
            },
            Err(_) => Config::default(),
        }
    }

    /// Load a configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        serde_json::from_str(&data).config_err("Parsing configuration")
    }

    /// Save the configuration to the default location
    pub fn save(&self) -> Result<()> {
        let data = serde_json::to_string_pretty(self).config_err("Serializing configuration")?;
        std::fs::write(Self::config_file_path(), data)?;
        Ok(())
    }

    fn config_file_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("aniplay");
        let _ = std::fs::create_dir_all(&path);
        path.push("config.json");
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log_level, "info");
        assert!(config.player.autoplay);
    }

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.log_level = "debug".to_string();
        config.player.default_volume = 0.4;
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.log_level, "debug");
        assert_eq!(loaded.player.default_volume, 0.4);
    }

    #[test]
    fn test_load_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}
