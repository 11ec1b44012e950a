//! Application configuration.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::{fs, path::Path};

use crate::consts::cli_consts::UPDATE_DISMISS_TTL_MS;

/// Client-side configuration persisted between runs.
///
/// `update_dismissed_until` is an epoch-milliseconds expiry: while it lies in
/// the future, update notices stay hidden.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_dismissed_until: Option<i64>,
}

/// Path of the config file, under the user's home directory.
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    let home = home::home_dir().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "Home directory not found")
    })?;
    Ok(home.join(".aitrade").join("config.json"))
}

impl Config {
    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Loads the config if it exists, falling back to defaults otherwise.
    pub fn load_or_default(path: &Path) -> Self {
        Config::load_from_file(path).unwrap_or_default()
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if writing to file fails or serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Removes the config file, ignoring a missing file.
    pub fn clear(path: &Path) -> Result<(), std::io::Error> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Whether an available update should currently be surfaced to the user.
    pub fn update_notice_visible(&self) -> bool {
        self.update_notice_visible_at(Utc::now().timestamp_millis())
    }

    pub fn update_notice_visible_at(&self, now_ms: i64) -> bool {
        match self.update_dismissed_until {
            Some(until) => now_ms >= until,
            None => true,
        }
    }

    /// Records a dismissal: notices stay hidden for the next 24 hours.
    pub fn dismiss_update(&mut self) {
        self.dismiss_update_at(Utc::now().timestamp_millis());
    }

    pub fn dismiss_update_at(&mut self, now_ms: i64) {
        self.update_dismissed_until = Some(now_ms + UPDATE_DISMISS_TTL_MS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    // Loading a saved configuration file should return the same configuration.
    fn test_load_recovers_saved_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = Config {
            server_url: Some("http://localhost:5000".to_string()),
            update_dismissed_until: Some(1_700_000_000_000),
        };
        config.save(&path).unwrap();

        let loaded_config = Config::load_from_file(&path).unwrap();
        assert_eq!(config, loaded_config);
    }

    #[test]
    // Saving a configuration should create directories if they don't exist.
    fn test_save_creates_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nonexistent_dir").join("config.json");

        let config = Config::default();
        let result = config.save(&path);

        assert!(result.is_ok(), "Failed to save config");
        assert!(
            path.parent().unwrap().exists(),
            "Parent directory does not exist"
        );
    }

    #[test]
    // Loading an invalid JSON file should return an error.
    fn test_load_rejects_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid_config.json");

        let mut file = File::create(&path).unwrap();
        writeln!(file, "invalid json").unwrap();

        let result = Config::load_from_file(&path);
        assert!(result.is_err());
    }

    #[test]
    // A dismissal hides the notice for 24 hours, then it reappears.
    fn test_update_dismissal_window() {
        let mut config = Config::default();
        assert!(config.update_notice_visible_at(0));

        config.dismiss_update_at(1_000);
        assert!(!config.update_notice_visible_at(1_000));
        assert!(!config.update_notice_visible_at(1_000 + UPDATE_DISMISS_TTL_MS - 1));
        assert!(config.update_notice_visible_at(1_000 + UPDATE_DISMISS_TTL_MS));
    }

    #[test]
    // Clearing a missing config file is not an error.
    fn test_clear_missing_file_is_ok() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert!(Config::clear(&path).is_ok());

        Config::default().save(&path).unwrap();
        assert!(path.exists());
        assert!(Config::clear(&path).is_ok());
        assert!(!path.exists());
    }
}
