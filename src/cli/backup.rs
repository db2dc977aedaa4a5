//! Backup CLI commands

use clap::Subcommand;

use crate::backup::{BackupManager, RestoreManager};
use crate::config::settings::Settings;
use crate::error::{QuincenaError, QuincenaResult};
use crate::storage::Storage;

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Write a backup now
    Create,

    /// List available backups
    List,

    /// Restore all data from a backup
    Restore {
        /// Backup filename (defaults to the most recent)
        filename: Option<String>,
    },
}

/// Handle a backup command
pub fn handle_backup_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BackupCommands,
) -> QuincenaResult<()> {
    let manager = BackupManager::new(storage.paths().clone(), settings.backup_retention);

    match cmd {
        BackupCommands::Create => {
            let (path, deleted) = manager.create_backup_with_retention()?;
            println!("Backup written to {}", path.display());
            if !deleted.is_empty() {
                println!("Pruned {} old backup(s)", deleted.len());
            }
        }

        BackupCommands::List => {
            let backups = manager.list_backups()?;
            if backups.is_empty() {
                println!("No backups found.");
            } else {
                for info in backups {
                    println!(
                        "{}  {}  {:>8} bytes",
                        info.created_at.format("%Y-%m-%d %H:%M:%S"),
                        info.filename,
                        info.size_bytes
                    );
                }
            }
        }

        BackupCommands::Restore { filename } => {
            let info = match filename {
                Some(name) => manager.get_backup(&name)?.ok_or(QuincenaError::NotFound {
                    entity_type: "Backup",
                    identifier: name,
                })?,
                None => manager.get_latest_backup()?.ok_or_else(|| {
                    QuincenaError::Backup("No backups available to restore".into())
                })?,
            };

            // Safety net before clobbering current data
            manager.create_backup()?;

            let restore = RestoreManager::new(storage.paths().clone());
            let result = restore.restore_from_file(&info.path)?;
            println!("Restored from {}", info.filename);
            println!("{}", result.summary());
        }
    }

    Ok(())
}
