//! Dashboard CLI command

use crate::display::format_dashboard;
use crate::error::QuincenaResult;
use crate::services::DashboardService;
use crate::storage::Storage;

use super::resolve_period;

/// Render the dashboard for a period (default: today's)
pub fn handle_dashboard_command(storage: &Storage, period: Option<&str>) -> QuincenaResult<()> {
    let period = resolve_period(storage, period)?;
    let today = chrono::Local::now().date_naive();

    let snapshot = DashboardService::new(storage).snapshot(period, today)?;
    print!("{}", format_dashboard(&snapshot));
    Ok(())
}
