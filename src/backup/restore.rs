//! Backup restoration for Quincena

use std::fs;
use std::path::Path;

use tracing::info;

use crate::config::paths::QuincenaPaths;
use crate::error::{QuincenaError, QuincenaResult};

use super::manager::{data_files, BackupArchive};

/// Handles restoring from backups
pub struct RestoreManager {
    paths: QuincenaPaths,
}

impl RestoreManager {
    /// Create a new RestoreManager
    pub fn new(paths: QuincenaPaths) -> Self {
        Self { paths }
    }

    /// Restore data from a backup file
    ///
    /// Overwrites all current data with the backup contents. Creating a
    /// fresh backup before restoring is recommended.
    pub fn restore_from_file(&self, backup_path: &Path) -> QuincenaResult<RestoreResult> {
        let archive = self.read_archive(backup_path)?;
        self.restore_from_archive(&archive)
    }

    /// Restore data from a parsed backup archive
    pub fn restore_from_archive(&self, archive: &BackupArchive) -> QuincenaResult<RestoreResult> {
        self.paths.ensure_directories()?;

        let mut result = RestoreResult {
            schema_version: archive.schema_version,
            backup_date: archive.created_at,
            restored: Vec::new(),
            skipped: Vec::new(),
        };

        for (name, path) in data_files(&self.paths) {
            match archive.sections.get(name) {
                Some(value) if !value.is_null() => {
                    let json = serde_json::to_string_pretty(value).map_err(|e| {
                        QuincenaError::Backup(format!("Failed to serialize {}: {}", name, e))
                    })?;
                    fs::write(&path, json).map_err(|e| {
                        QuincenaError::Backup(format!("Failed to restore {}: {}", name, e))
                    })?;
                    result.restored.push(name);
                }
                _ => result.skipped.push(name),
            }
        }

        info!(restored = result.restored.len(), "backup restored");
        Ok(result)
    }

    /// Validate a backup file without restoring it
    pub fn validate_backup(&self, backup_path: &Path) -> QuincenaResult<RestoreResult> {
        let archive = self.read_archive(backup_path)?;

        let mut result = RestoreResult {
            schema_version: archive.schema_version,
            backup_date: archive.created_at,
            restored: Vec::new(),
            skipped: Vec::new(),
        };
        for (name, _) in data_files(&self.paths) {
            match archive.sections.get(name) {
                Some(value) if value.is_object() => result.restored.push(name),
                _ => result.skipped.push(name),
            }
        }
        Ok(result)
    }

    fn read_archive(&self, backup_path: &Path) -> QuincenaResult<BackupArchive> {
        let contents = fs::read_to_string(backup_path)
            .map_err(|e| QuincenaError::Backup(format!("Failed to read backup file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| QuincenaError::Backup(format!("Failed to parse backup file: {}", e)))
    }
}

/// Result of a restore (or validation) pass over an archive
#[derive(Debug)]
pub struct RestoreResult {
    /// Schema version of the backup
    pub schema_version: u32,
    /// Date the backup was created
    pub backup_date: chrono::DateTime<chrono::Utc>,
    /// Sections restored (or present, when validating)
    pub restored: Vec<&'static str>,
    /// Sections the archive did not carry
    pub skipped: Vec<&'static str>,
}

impl RestoreResult {
    /// Whether every data file had a section in the archive
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Human-readable summary
    pub fn summary(&self) -> String {
        if self.is_complete() {
            format!("Complete backup (v{})", self.schema_version)
        } else {
            format!(
                "Partial backup (v{}): has {}, missing {}",
                self.schema_version,
                self.restored.join(", "),
                self.skipped.join(", ")
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::manager::BackupManager;
    use tempfile::TempDir;

    fn create_test_env() -> (RestoreManager, BackupManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = QuincenaPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();

        let backup_manager = BackupManager::new(paths.clone(), 10);
        let restore_manager = RestoreManager::new(paths);

        (restore_manager, backup_manager, temp_dir)
    }

    #[test]
    fn test_restore_round_trip() {
        let (restore_manager, backup_manager, temp) = create_test_env();

        let expenses_file = temp.path().join("data").join("expenses.json");
        fs::write(&expenses_file, r#"{"expenses": []}"#).unwrap();

        let backup_path = backup_manager.create_backup().unwrap();

        // Clobber the data, then restore
        fs::write(&expenses_file, "{}").unwrap();
        let result = restore_manager.restore_from_file(&backup_path).unwrap();

        assert!(result.restored.contains(&"expenses"));
        let contents = fs::read_to_string(&expenses_file).unwrap();
        assert!(contents.contains("expenses"));
    }

    #[test]
    fn test_validate_backup() {
        let (restore_manager, backup_manager, _temp) = create_test_env();

        let backup_path = backup_manager.create_backup().unwrap();
        let result = restore_manager.validate_backup(&backup_path).unwrap();

        assert_eq!(result.schema_version, 1);
        assert!(result.is_complete());
        assert!(result.summary().contains("Complete backup"));
    }

    #[test]
    fn test_restore_recreates_missing_data_dir() {
        let (restore_manager, backup_manager, temp) = create_test_env();

        let backup_path = backup_manager.create_backup().unwrap();

        let data_dir = temp.path().join("data");
        if data_dir.exists() {
            fs::remove_dir_all(&data_dir).unwrap();
        }

        restore_manager.restore_from_file(&backup_path).unwrap();
        assert!(data_dir.exists());
    }

    #[test]
    fn test_invalid_file_rejected() {
        let (restore_manager, _backup_manager, temp) = create_test_env();

        let bogus = temp.path().join("not-a-backup.json");
        fs::write(&bogus, "not json").unwrap();

        assert!(restore_manager.restore_from_file(&bogus).is_err());
    }
}
