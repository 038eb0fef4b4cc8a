//! Config manager for loading and saving settings.
//!
//! Writes are atomic (write to temp file, then rename) so a crash
//! mid-save never leaves a truncated config behind. Loading validates
//! the parsed settings and falls back to defaults for invalid values.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::settings::Settings;

/// Errors that can occur during config operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Manages application configuration.
pub struct ConfigManager {
    /// Path to the config file.
    config_path: PathBuf,
    /// Current settings loaded in memory.
    settings: Settings,
}

impl ConfigManager {
    /// Create a new config manager with the given config file path.
    ///
    /// Does not load the config - call `load()` or `load_or_create()`
    /// after.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            settings: Settings::default(),
        }
    }

    /// Get the config file path.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Get a reference to the current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get a mutable reference to the current settings.
    ///
    /// Note: changes made here are only in memory until `save()` is
    /// called.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Load config from file.
    ///
    /// Returns an error if the file doesn't exist.
    pub fn load(&mut self) -> ConfigResult<()> {
        if !self.config_path.exists() {
            return Err(ConfigError::NotFound(self.config_path.clone()));
        }

        let content = fs::read_to_string(&self.config_path)?;
        let mut settings: Settings = toml::from_str(&content)?;
        settings.validate();
        self.settings = settings;
        Ok(())
    }

    /// Load config from file, creating it with defaults if missing.
    ///
    /// If validation had to clean anything up, the cleaned config is
    /// saved back.
    pub fn load_or_create(&mut self) -> ConfigResult<()> {
        if self.config_path.exists() {
            let content = fs::read_to_string(&self.config_path)?;
            let mut settings: Settings = toml::from_str(&content)?;
            let was_modified = settings.validate();
            self.settings = settings;

            if was_modified {
                self.save()?;
            }
        } else {
            if let Some(parent) = self.config_path.parent() {
                fs::create_dir_all(parent)?;
            }

            self.settings = Settings::default();
            self.save()?;
        }
        Ok(())
    }

    /// Save current settings to the config file atomically.
    pub fn save(&self) -> ConfigResult<()> {
        let content = toml::to_string_pretty(&self.settings)?;

        let temp_path = self.config_path.with_extension("toml.tmp");
        {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&temp_path, &self.config_path)?;

        tracing::debug!("saved config to {}", self.config_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager_in(dir: &TempDir) -> ConfigManager {
        ConfigManager::new(dir.path().join("config.toml"))
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let mut manager = manager_in(&dir);
        assert!(matches!(manager.load(), Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn load_or_create_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let mut manager = manager_in(&dir);
        manager.load_or_create().unwrap();

        assert!(manager.path().exists());
        assert_eq!(manager.settings().metronome.bpm, 120.0);

        // A second manager reads the same values back.
        let mut reread = manager_in(&dir);
        reread.load().unwrap();
        assert_eq!(reread.settings().analysis.window_size, 10);
    }

    #[test]
    fn save_round_trips_changes() {
        let dir = TempDir::new().unwrap();
        let mut manager = manager_in(&dir);
        manager.load_or_create().unwrap();

        manager.settings_mut().metronome.bpm = 90.0;
        manager.settings_mut().analysis.min_samples = 4;
        manager.save().unwrap();

        let mut reread = manager_in(&dir);
        reread.load().unwrap();
        assert_eq!(reread.settings().metronome.bpm, 90.0);
        assert_eq!(reread.settings().analysis.min_samples, 4);
    }

    #[test]
    fn invalid_values_cleaned_and_persisted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[metronome]\nbpm = 0.0\n").unwrap();

        let mut manager = ConfigManager::new(&path);
        manager.load_or_create().unwrap();
        assert_eq!(manager.settings().metronome.bpm, 120.0);

        // The cleaned value was written back.
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("120"));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "not valid toml [[[").unwrap();

        let mut manager = ConfigManager::new(&path);
        assert!(matches!(manager.load(), Err(ConfigError::ParseError(_))));
    }
}
