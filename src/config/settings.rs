//! User settings for Quincena
//!
//! Manages application-level preferences, currently backup behavior. Ledger
//! settings that drive period resolution (pay days, period mode) live in the
//! data store, not here.

use serde::{Deserialize, Serialize};

use super::paths::QuincenaPaths;
use crate::error::QuincenaError;

/// User settings for Quincena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Number of backup archives to keep
    #[serde(default = "default_backup_retention")]
    pub backup_retention: usize,

    /// Whether a backup is written automatically at startup
    #[serde(default = "default_auto_backup")]
    pub auto_backup: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_backup_retention() -> usize {
    10
}

fn default_auto_backup() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            backup_retention: default_backup_retention(),
            auto_backup: default_auto_backup(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &QuincenaPaths) -> Result<Self, QuincenaError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| QuincenaError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                QuincenaError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &QuincenaPaths) -> Result<(), QuincenaError> {
        // Ensure the config directory exists
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| QuincenaError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| QuincenaError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.backup_retention, 10);
        assert!(settings.auto_backup);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = QuincenaPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.backup_retention = 5;
        settings.auto_backup = false;

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.backup_retention, 5);
        assert!(!loaded.auto_backup);
    }

    #[test]
    fn test_unknown_keys_in_settings_file_are_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let paths = QuincenaPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();

        // Settings files written by older versions may carry extra keys
        std::fs::write(
            paths.settings_file(),
            r#"{"schema_version": 1, "currency_symbol": "RD$", "backup_retention": 7}"#,
        )
        .unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.backup_retention, 7);
        assert!(loaded.auto_backup);
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = QuincenaPaths::with_base_dir(temp_dir.path().to_path_buf());

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.backup_retention, 10);
    }
}
