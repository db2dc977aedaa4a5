//! Backup manager for Quincena
//!
//! Creates dated JSON archives of every data file and prunes old ones down
//! to the configured retention count.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::paths::QuincenaPaths;
use crate::error::{QuincenaError, QuincenaResult};

/// Metadata about a backup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupInfo {
    /// Backup filename
    pub filename: String,
    /// Full path to backup
    pub path: PathBuf,
    /// When the backup was created
    pub created_at: DateTime<Utc>,
    /// Size in bytes
    pub size_bytes: u64,
}

/// Backup archive format
#[derive(Debug, Serialize, Deserialize)]
pub struct BackupArchive {
    /// Schema version for migration support
    pub schema_version: u32,
    /// When the backup was created
    pub created_at: DateTime<Utc>,
    /// One JSON value per data file, keyed by file stem
    pub sections: BTreeMap<String, serde_json::Value>,
}

/// The data files a backup covers, keyed by the stem used in the archive
pub(super) fn data_files(paths: &QuincenaPaths) -> Vec<(&'static str, PathBuf)> {
    vec![
        ("categories", paths.categories_file()),
        ("expenses", paths.expenses_file()),
        ("fixed_payments", paths.fixed_payments_file()),
        ("loans", paths.loans_file()),
        ("income", paths.income_file()),
        ("savings", paths.savings_file()),
        ("salary", paths.salary_file()),
        ("ledger_settings", paths.ledger_settings_file()),
        ("period_overrides", paths.period_overrides_file()),
    ]
}

/// Manages backup creation and retention
pub struct BackupManager {
    backup_dir: PathBuf,
    paths: QuincenaPaths,
    /// How many archives to keep
    retention: usize,
}

impl BackupManager {
    /// Create a new BackupManager
    pub fn new(paths: QuincenaPaths, retention: usize) -> Self {
        let backup_dir = paths.backup_dir();
        Self {
            backup_dir,
            paths,
            retention,
        }
    }

    /// Create a backup of all data
    ///
    /// Returns the path to the created backup file.
    pub fn create_backup(&self) -> QuincenaResult<PathBuf> {
        fs::create_dir_all(&self.backup_dir)
            .map_err(|e| QuincenaError::Backup(format!("Failed to create backup directory: {}", e)))?;

        let now = Utc::now();
        let filename = format!(
            "backup-{}-{:03}.json",
            now.format("%Y%m%d-%H%M%S"),
            now.timestamp_subsec_millis()
        );
        let backup_path = self.backup_dir.join(&filename);

        let archive = self.create_archive(now)?;

        let json = serde_json::to_string_pretty(&archive)
            .map_err(|e| QuincenaError::Backup(format!("Failed to serialize backup: {}", e)))?;

        fs::write(&backup_path, json)
            .map_err(|e| QuincenaError::Backup(format!("Failed to write backup file: {}", e)))?;

        info!(path = %backup_path.display(), "backup written");
        Ok(backup_path)
    }

    /// Create a backup archive from current data
    fn create_archive(&self, timestamp: DateTime<Utc>) -> QuincenaResult<BackupArchive> {
        let mut sections = BTreeMap::new();
        for (name, path) in data_files(&self.paths) {
            sections.insert(name.to_string(), read_json_value(&path)?);
        }

        Ok(BackupArchive {
            schema_version: 1,
            created_at: timestamp,
            sections,
        })
    }

    /// List all available backups, newest first
    pub fn list_backups(&self) -> QuincenaResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();

        for entry in fs::read_dir(&self.backup_dir)
            .map_err(|e| QuincenaError::Backup(format!("Failed to read backup directory: {}", e)))?
        {
            let entry = entry.map_err(|e| {
                QuincenaError::Backup(format!("Failed to read directory entry: {}", e))
            })?;

            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                if let Some(info) = parse_backup_info(&path) {
                    backups.push(info);
                }
            }
        }

        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(backups)
    }

    /// Delete backups beyond the retention count, oldest first
    pub fn enforce_retention(&self) -> QuincenaResult<Vec<PathBuf>> {
        let backups = self.list_backups()?;
        let mut deleted = Vec::new();

        for backup in backups.into_iter().skip(self.retention) {
            fs::remove_file(&backup.path)
                .map_err(|e| QuincenaError::Backup(format!("Failed to delete old backup: {}", e)))?;
            deleted.push(backup.path);
        }

        if !deleted.is_empty() {
            info!(count = deleted.len(), "pruned old backups");
        }
        Ok(deleted)
    }

    /// Create a backup and then enforce the retention policy
    pub fn create_backup_with_retention(&self) -> QuincenaResult<(PathBuf, Vec<PathBuf>)> {
        let backup_path = self.create_backup()?;
        let deleted = self.enforce_retention()?;
        Ok((backup_path, deleted))
    }

    /// Get backup directory path
    pub fn backup_dir(&self) -> &PathBuf {
        &self.backup_dir
    }

    /// Get a specific backup by filename
    pub fn get_backup(&self, filename: &str) -> QuincenaResult<Option<BackupInfo>> {
        let path = self.backup_dir.join(filename);
        if path.exists() {
            Ok(parse_backup_info(&path))
        } else {
            Ok(None)
        }
    }

    /// Get the most recent backup
    pub fn get_latest_backup(&self) -> QuincenaResult<Option<BackupInfo>> {
        let backups = self.list_backups()?;
        Ok(backups.into_iter().next())
    }
}

/// Parse backup info from a backup file
fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_string_lossy().to_string();

    // Filename format: backup-YYYYMMDD-HHMMSS-mmm.json
    let date_part = filename.strip_prefix("backup-")?.strip_suffix(".json")?;
    let created_at = parse_backup_timestamp(date_part)?;

    let metadata = fs::metadata(path).ok()?;

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        created_at,
        size_bytes: metadata.len(),
    })
}

/// Read a JSON file as a generic Value, or an empty object when missing
fn read_json_value(path: &Path) -> QuincenaResult<serde_json::Value> {
    if !path.exists() {
        return Ok(serde_json::Value::Object(serde_json::Map::new()));
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| QuincenaError::Backup(format!("Failed to read file for backup: {}", e)))?;

    serde_json::from_str(&contents)
        .map_err(|e| QuincenaError::Backup(format!("Failed to parse JSON for backup: {}", e)))
}

/// Parse a backup timestamp from the filename date part
fn parse_backup_timestamp(date_str: &str) -> Option<DateTime<Utc>> {
    // YYYYMMDD-HHMMSS or YYYYMMDD-HHMMSS-mmm
    let parts: Vec<&str> = date_str.split('-').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return None;
    }

    let date_part = parts[0];
    let time_part = parts[1];
    let millis: u32 = if parts.len() == 3 {
        parts[2].parse().unwrap_or(0)
    } else {
        0
    };

    if date_part.len() != 8 || time_part.len() != 6 {
        return None;
    }

    let year: i32 = date_part[0..4].parse().ok()?;
    let month: u32 = date_part[4..6].parse().ok()?;
    let day: u32 = date_part[6..8].parse().ok()?;
    let hour: u32 = time_part[0..2].parse().ok()?;
    let minute: u32 = time_part[2..4].parse().ok()?;
    let second: u32 = time_part[4..6].parse().ok()?;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = chrono::NaiveTime::from_hms_milli_opt(hour, minute, second, millis)?;
    let datetime = chrono::NaiveDateTime::new(date, time);

    Some(DateTime::from_naive_utc_and_offset(datetime, Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use tempfile::TempDir;

    fn create_test_manager() -> (BackupManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = QuincenaPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();

        let manager = BackupManager::new(paths, 3);
        (manager, temp_dir)
    }

    #[test]
    fn test_create_backup() {
        let (manager, _temp) = create_test_manager();

        let backup_path = manager.create_backup().unwrap();
        assert!(backup_path.exists());
        assert!(backup_path.to_string_lossy().contains("backup-"));
    }

    #[test]
    fn test_list_backups_newest_first() {
        let (manager, _temp) = create_test_manager();

        manager.create_backup().unwrap();
        std::thread::sleep(std::time::Duration::from_millis(100));
        manager.create_backup().unwrap();

        let backups = manager.list_backups().unwrap();
        assert_eq!(backups.len(), 2);
        assert!(backups[0].created_at >= backups[1].created_at);
    }

    #[test]
    fn test_retention_policy() {
        let (manager, _temp) = create_test_manager();

        for _ in 0..5 {
            manager.create_backup().unwrap();
            std::thread::sleep(std::time::Duration::from_millis(50));
        }

        let deleted = manager.enforce_retention().unwrap();
        assert_eq!(deleted.len(), 2);

        let remaining = manager.list_backups().unwrap();
        assert_eq!(remaining.len(), 3);
    }

    #[test]
    fn test_get_latest_backup() {
        let (manager, _temp) = create_test_manager();

        assert!(manager.get_latest_backup().unwrap().is_none());

        let path = manager.create_backup().unwrap();

        let latest = manager.get_latest_backup().unwrap().unwrap();
        assert_eq!(latest.path, path);
    }

    #[test]
    fn test_parse_backup_timestamp() {
        let timestamp = parse_backup_timestamp("20260415-143022").unwrap();
        assert_eq!(timestamp.year(), 2026);
        assert_eq!(timestamp.month(), 4);
        assert_eq!(timestamp.day(), 15);

        let timestamp = parse_backup_timestamp("20260415-143022-456").unwrap();
        assert_eq!(timestamp.day(), 15);

        assert!(parse_backup_timestamp("garbage").is_none());
    }

    #[test]
    fn test_backup_archive_covers_all_sections() {
        let (manager, _temp) = create_test_manager();

        let backup_path = manager.create_backup().unwrap();

        let contents = fs::read_to_string(&backup_path).unwrap();
        let archive: BackupArchive = serde_json::from_str(&contents).unwrap();

        assert_eq!(archive.schema_version, 1);
        for (name, _) in data_files(&QuincenaPaths::with_base_dir(PathBuf::from("/tmp"))) {
            assert!(archive.sections.contains_key(name), "missing {}", name);
        }
    }

    #[test]
    fn test_empty_backup_dir() {
        let (manager, _temp) = create_test_manager();

        let backups = manager.list_backups().unwrap();
        assert!(backups.is_empty());
    }
}
