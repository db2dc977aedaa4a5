//! Export CLI command

use std::fs::File;
use std::path::PathBuf;

use clap::Args;

use crate::error::{QuincenaError, QuincenaResult};
use crate::export::{default_export_filename, export_period_csv};
use crate::reports::PeriodReport;
use crate::storage::Storage;

use super::resolve_period;

/// Export a period's expenses to CSV
#[derive(Args)]
pub struct ExportArgs {
    /// Period as YYYY-MM-C (defaults to the current one)
    #[arg(short, long)]
    pub period: Option<String>,

    /// Output file (defaults to gastos_YYYY_MM_C.csv in the current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the export command
pub fn handle_export_command(storage: &Storage, args: ExportArgs) -> QuincenaResult<()> {
    let period = resolve_period(storage, args.period.as_deref())?;
    let today = chrono::Local::now().date_naive();

    let report = PeriodReport::generate(storage, period, today)?;
    let path = args
        .output
        .unwrap_or_else(|| PathBuf::from(default_export_filename(period, report.mode())));

    let file = File::create(&path)
        .map_err(|e| QuincenaError::Export(format!("Failed to create {}: {}", path.display(), e)))?;
    export_period_csv(storage, &report, file)?;

    println!(
        "Exported {} expenses to {}",
        report.expenses.len(),
        path.display()
    );
    Ok(())
}
