//! Application configuration persisted as TOML

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Unable to determine config directory")]
    NoConfigDir,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// User configuration loaded from `config.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Theme selected at startup
    pub theme: Option<String>,

    /// Collection file opened when none is given on the command line
    pub collection_path: Option<PathBuf>,

    /// Width of the list pane as a percentage of the terminal width
    pub list_width_percent: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: None,
            collection_path: None,
            list_width_percent: 38,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default config directory
    pub fn load() -> ConfigResult<Self> {
        Self::load_from_dir(&Self::default_config_dir()?)
    }

    /// Load configuration from `dir/config.toml`, falling back to defaults
    /// when the file does not exist
    pub fn load_from_dir(dir: &Path) -> ConfigResult<Self> {
        let config_path = dir.join("config.toml");

        if !config_path.exists() {
            tracing::debug!("No config file at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: AppConfig = toml::from_str(&content)?;
        tracing::debug!("Loaded configuration from {}", config_path.display());
        Ok(config)
    }

    /// Save configuration to the default config directory
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to_dir(&Self::default_config_dir()?)
    }

    /// Save configuration to `dir/config.toml`, creating the directory if needed
    pub fn save_to_dir(&self, dir: &Path) -> ConfigResult<()> {
        fs::create_dir_all(dir)?;
        let content = toml::to_string_pretty(self)?;
        fs::write(dir.join("config.toml"), content)?;
        Ok(())
    }

    /// Default config directory, `$XDG_CONFIG_HOME/marcador` with a
    /// `~/.config` fallback
    pub fn default_config_dir() -> ConfigResult<PathBuf> {
        let base = if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            PathBuf::from(xdg_config)
        } else if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home).join(".config")
        } else {
            return Err(ConfigError::NoConfigDir);
        };

        Ok(base.join("marcador"))
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), String> {
        if !(20..=60).contains(&self.list_width_percent) {
            return Err(format!(
                "list_width_percent must be between 20 and 60, got {}",
                self.list_width_percent
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.theme.is_none());
        assert!(config.collection_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = AppConfig::load_from_dir(dir.path()).expect("load");
        assert_eq!(config.list_width_percent, AppConfig::default().list_width_percent);
    }

    #[test]
    fn round_trips_through_toml() {
        let dir = tempfile::tempdir().expect("tempdir");

        let mut config = AppConfig::default();
        config.theme = Some("High Contrast".to_string());
        config.collection_path = Some(PathBuf::from("/tmp/bookmarks.json"));
        config.list_width_percent = 42;
        config.save_to_dir(dir.path()).expect("save");

        let loaded = AppConfig::load_from_dir(dir.path()).expect("load");
        assert_eq!(loaded.theme.as_deref(), Some("High Contrast"));
        assert_eq!(
            loaded.collection_path.as_deref(),
            Some(Path::new("/tmp/bookmarks.json"))
        );
        assert_eq!(loaded.list_width_percent, 42);
    }

    #[test]
    fn partial_file_fills_missing_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("config.toml"), "theme = \"Gruvbox Dark\"\n").expect("write");

        let config = AppConfig::load_from_dir(dir.path()).expect("load");
        assert_eq!(config.theme.as_deref(), Some("Gruvbox Dark"));
        assert_eq!(config.list_width_percent, AppConfig::default().list_width_percent);
    }

    #[test]
    fn validate_rejects_extreme_widths() {
        let mut config = AppConfig::default();
        config.list_width_percent = 5;
        assert!(config.validate().is_err());

        config.list_width_percent = 95;
        assert!(config.validate().is_err());

        config.list_width_percent = 40;
        assert!(config.validate().is_ok());
    }
}
