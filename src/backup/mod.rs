//! Backup system for Quincena
//!
//! Rolling JSON backups of every ledger data file, written at startup and on
//! demand, with retention pruning that keeps the most recent N archives.
//!
//! # Backup Format
//!
//! A backup is a single JSON file holding:
//! - `schema_version`: for migration support
//! - `created_at`: when the backup was written
//! - `sections`: one JSON value per data file, keyed by file stem
//!   (`expenses`, `savings`, `salary`, ...)
//!
//! # Example
//!
//! ```rust,ignore
//! use quincena::backup::{BackupManager, RestoreManager};
//! use quincena::config::paths::QuincenaPaths;
//!
//! let paths = QuincenaPaths::new()?;
//! let manager = BackupManager::new(paths.clone(), 10);
//! let backup_path = manager.create_backup()?;
//! manager.enforce_retention()?;
//!
//! let restore = RestoreManager::new(paths);
//! let result = restore.restore_from_file(&backup_path)?;
//! println!("{}", result.summary());
//! ```

mod manager;
mod restore;

pub use manager::{BackupArchive, BackupInfo, BackupManager};
pub use restore::{RestoreManager, RestoreResult};
