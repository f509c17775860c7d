//! Settings Persistence
//!
//! Handles locating, loading and saving the application configuration in the
//! platform configuration directory.

use crate::config::Config;
use crate::error::{ConfigError, SettingsError, SettingsResult};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Directory name under the platform config directory
const APP_DIR: &str = "facepanel";
/// Settings file name
const CONFIG_FILE: &str = "config.toml";

/// Settings persistence layer
#[derive(Debug, Clone, Default)]
pub struct SettingsPersistence {
    config: Config,
    path: Option<PathBuf>,
}

impl SettingsPersistence {
    /// Create new persistence layer with default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Default settings file location (`<config_dir>/facepanel/config.toml`)
    pub fn default_path() -> SettingsResult<PathBuf> {
        let base = dirs::config_dir().ok_or_else(|| {
            SettingsError::from(ConfigError::UnsupportedPlatform(
                std::env::consts::OS.to_string(),
            ))
        })?;
        Ok(base.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load settings from file
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let config = Config::load_from_file(path)?;
        Ok(Self {
            config,
            path: Some(path.to_path_buf()),
        })
    }

    /// Load settings from `path`, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if !path.exists() {
            debug!("No settings at {}, using defaults", path.display());
            return Ok(Self {
                config: Config::default(),
                path: Some(path.to_path_buf()),
            });
        }
        Self::load_from_file(path)
    }

    /// Load settings from the default location, or defaults when unavailable
    pub fn load_default_location() -> Self {
        match Self::default_path().and_then(|path| Self::load_or_default(&path)) {
            Ok(persistence) => persistence,
            Err(e) => {
                warn!("Falling back to default settings: {}", e);
                Self::new()
            }
        }
    }

    /// Save settings to file, creating the parent directory when needed
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| SettingsError::ConfigDirectory(e.to_string()))?;
            }
        }
        self.config.save_to_file(path)
    }

    /// Save settings back to the file they were loaded from
    pub fn save(&self) -> SettingsResult<()> {
        let path = match &self.path {
            Some(path) => path.clone(),
            None => Self::default_path()?,
        };
        self.save_to_file(&path)
    }

    /// Get reference to config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get mutable reference to config
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Path the settings were loaded from
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Consume the persistence layer and return the config
    pub fn into_config(self) -> Config {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let persistence = SettingsPersistence::load_or_default(&path).unwrap();
        assert_eq!(persistence.config().render.base_size, 1024);
        assert_eq!(persistence.path(), Some(path.as_path()));
    }

    #[test]
    fn test_save_and_reload_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut persistence = SettingsPersistence::load_or_default(&path).unwrap();
        persistence.config_mut().render.ppi = 240.0;
        persistence.config_mut().export.force_screw_holes = false;
        persistence.save().unwrap();

        let reloaded = SettingsPersistence::load_from_file(&path).unwrap();
        assert_eq!(reloaded.config().render.ppi, 240.0);
        assert!(!reloaded.config().export.force_screw_holes);
    }

    #[test]
    fn test_save_and_reload_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut persistence = SettingsPersistence::new();
        persistence.config_mut().defaults.width = 12.5;
        persistence.save_to_file(&path).unwrap();

        let config = SettingsPersistence::load_from_file(&path)
            .unwrap()
            .into_config();
        assert_eq!(config.defaults.width, 12.5);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[render]\nppi = -5.0\n").unwrap();
        assert!(SettingsPersistence::load_from_file(&path).is_err());
    }
}
