//! Path management for Quincena
//!
//! Provides XDG-compliant path resolution for configuration, data, and backups.
//!
//! ## Path Resolution Order
//!
//! 1. `QUINCENA_DATA_DIR` environment variable (if set)
//! 2. Platform default via the `directories` crate
//!    (Linux: `~/.config/quincena`, macOS: `~/Library/Application Support/quincena`,
//!    Windows: `%APPDATA%\quincena`)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::QuincenaError;

/// Manages all paths used by Quincena
#[derive(Debug, Clone)]
pub struct QuincenaPaths {
    /// Base directory for all Quincena data
    base_dir: PathBuf,
}

impl QuincenaPaths {
    /// Create a new QuincenaPaths instance
    ///
    /// Path resolution:
    /// 1. `QUINCENA_DATA_DIR` env var (explicit override)
    /// 2. Platform default from `directories`
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, QuincenaError> {
        let base_dir = if let Ok(custom) = std::env::var("QUINCENA_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create QuincenaPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the backup directory (`<base>/backups/`)
    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to categories.json
    pub fn categories_file(&self) -> PathBuf {
        self.data_dir().join("categories.json")
    }

    /// Get the path to expenses.json
    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    /// Get the path to fixed_payments.json
    pub fn fixed_payments_file(&self) -> PathBuf {
        self.data_dir().join("fixed_payments.json")
    }

    /// Get the path to loans.json
    pub fn loans_file(&self) -> PathBuf {
        self.data_dir().join("loans.json")
    }

    /// Get the path to income.json (extra income rows)
    pub fn income_file(&self) -> PathBuf {
        self.data_dir().join("income.json")
    }

    /// Get the path to savings.json (records, running total, goals)
    pub fn savings_file(&self) -> PathBuf {
        self.data_dir().join("savings.json")
    }

    /// Get the path to salary.json (base salary + per-period overrides)
    pub fn salary_file(&self) -> PathBuf {
        self.data_dir().join("salary.json")
    }

    /// Get the path to ledger_settings.json (period mode, pay days)
    pub fn ledger_settings_file(&self) -> PathBuf {
        self.data_dir().join("ledger_settings.json")
    }

    /// Get the path to period_overrides.json
    pub fn period_overrides_file(&self) -> PathBuf {
        self.data_dir().join("period_overrides.json")
    }

    /// Ensure all required directories exist
    ///
    /// Creates:
    /// - Base directory
    /// - Data directory (`<base>/data/`)
    /// - Backup directory (`<base>/backups/`)
    pub fn ensure_directories(&self) -> Result<(), QuincenaError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| QuincenaError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| QuincenaError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.backup_dir())
            .map_err(|e| QuincenaError::Io(format!("Failed to create backup directory: {}", e)))?;

        Ok(())
    }

    /// Check if Quincena has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
fn resolve_default_path() -> Result<PathBuf, QuincenaError> {
    let dirs = ProjectDirs::from("", "", "quincena")
        .ok_or_else(|| QuincenaError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = QuincenaPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.backup_dir(), temp_dir.path().join("backups"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = QuincenaPaths::with_base_dir(temp_dir.path().to_path_buf());

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(paths.backup_dir().exists());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = QuincenaPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.expenses_file(),
            temp_dir.path().join("data").join("expenses.json")
        );
    }
}
