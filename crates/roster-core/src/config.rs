//! Configuration management for Roster.
//!
//! This module provides configuration loading, saving, and defaults.
//! Configuration is stored in TOML format in a platform-appropriate
//! location.

use crate::error::{Result, RosterError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Main configuration structure for Roster.
///
/// ## Example Configuration File (roster.toml)
///
/// ```toml
/// [general]
/// current_user = "admin"
/// log_level = "info"
///
/// [ui]
/// page_size = 50
/// page_size_options = [4, 25, 50, 100]
///
/// [export]
/// delimiter = ","
/// employee_file = "employees.csv"
/// hiring_file = "hiring_data.csv"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Table view settings
    pub ui: UiConfig,

    /// Export settings
    pub export: ExportConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            general: GeneralConfig::default(),
            ui: UiConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

/// General configuration options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Name stamped into the audit fields of every mutation
    pub current_user: String,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            current_user: "admin".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Table view configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Records per page when a session starts
    pub page_size: usize,

    /// Page sizes the browser cycles through
    pub page_size_options: Vec<usize>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            page_size: 50,
            page_size_options: vec![4, 25, 50, 100],
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Cell delimiter for exported files
    pub delimiter: char,

    /// Default output file for employee exports
    pub employee_file: String,

    /// Default output file for hiring exports
    pub hiring_file: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            delimiter: ',',
            employee_file: "employees.csv".to_string(),
            hiring_file: "hiring_data.csv".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default config if no config file exists.
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Config::default());
        }

        info!(path = %path.display(), "Loading configuration");
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents).map_err(|e| RosterError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
        })?;

        Ok(config)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        info!(path = %path.display(), "Saving configuration");
        let contents = toml::to_string_pretty(self).map_err(|e| RosterError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "roster").ok_or_else(|| RosterError::ConfigError {
            reason: "Could not determine config directory".to_string(),
        })?;

        Ok(dirs.config_dir().join("roster.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.current_user, "admin");
        assert_eq!(config.ui.page_size, 50);
        assert_eq!(config.ui.page_size_options, vec![4, 25, 50, 100]);
        assert_eq!(config.export.delimiter, ',');
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let mut config = Config::default();
        config.general.current_user = "hr-lead".to_string();
        config.ui.page_size = 25;
        config.export.delimiter = ';';

        config.save_to(&config_path).unwrap();
        let loaded = Config::load_from(&config_path).unwrap();

        assert_eq!(loaded.general.current_user, "hr-lead");
        assert_eq!(loaded.ui.page_size, 25);
        assert_eq!(loaded.export.delimiter, ';');
    }

    #[test]
    fn test_load_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.ui.page_size, 50); // Default value
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("partial.toml");
        fs::write(&config_path, "[ui]\npage_size = 100\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.ui.page_size, 100);
        assert_eq!(config.general.current_user, "admin");
    }
}
