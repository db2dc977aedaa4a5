//! Period CLI commands
//!
//! Shows resolved period ranges and configures the resolver: period mode,
//! pay days, and explicit per-period overrides.

use clap::Subcommand;

use crate::error::{QuincenaError, QuincenaResult};
use crate::models::PeriodMode;
use crate::services::PeriodService;
use crate::storage::Storage;

use super::{parse_date, resolve_period};

/// Period subcommands
#[derive(Subcommand)]
pub enum PeriodCommands {
    /// Show a period's resolved date range (defaults to the current one)
    Show {
        /// Period as YYYY-MM-C
        period: Option<String>,
    },

    /// Switch between quincenal and mensual modes
    #[command(name = "set-mode")]
    SetMode {
        /// quincenal or mensual
        mode: String,
    },

    /// Set the two quincenal pay days
    #[command(name = "set-days")]
    SetDays {
        /// First pay day (1-31)
        day1: u32,
        /// Second pay day (1-31)
        day2: u32,
    },

    /// Set the monthly pay day
    #[command(name = "set-payday")]
    SetPayday {
        /// Pay day (1-31, clamped in short months)
        day: u32,
    },

    /// Pin a period to an explicit date range
    Override {
        /// Period as YYYY-MM-C
        period: String,
        /// Start date (YYYY-MM-DD)
        start: String,
        /// End date (YYYY-MM-DD)
        end: String,
    },

    /// Remove a period's override
    #[command(name = "clear-override")]
    ClearOverride {
        /// Period as YYYY-MM-C
        period: String,
    },

    /// List all period overrides
    Overrides,
}

/// Handle a period command
pub fn handle_period_command(storage: &Storage, cmd: PeriodCommands) -> QuincenaResult<()> {
    let service = PeriodService::new(storage);

    match cmd {
        PeriodCommands::Show { period } => {
            let mode = service.mode()?;
            let period = resolve_period(storage, period.as_deref())?;
            let (start, end) = service.resolve_range(period)?;
            println!("{}", period.label(mode));
            println!("{} - {}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d"));
        }

        PeriodCommands::SetMode { mode } => {
            let mode: PeriodMode = mode.parse().map_err(|_| {
                QuincenaError::validation("mode", format!("'{}' is not quincenal or mensual", mode))
            })?;
            storage.ledger_settings.set_period_mode(mode)?;
            storage.ledger_settings.save()?;
            println!("Period mode set to {}", mode);
        }

        PeriodCommands::SetDays { day1, day2 } => {
            storage.ledger_settings.set_quincenal_pay_days(day1, day2)?;
            storage.ledger_settings.save()?;
            println!("Quincenal pay days set to {} and {}", day1, day2);
        }

        PeriodCommands::SetPayday { day } => {
            storage.ledger_settings.set_monthly_pay_day(day)?;
            storage.ledger_settings.save()?;
            println!("Monthly pay day set to {}", day);
        }

        PeriodCommands::Override { period, start, end } => {
            let period = resolve_period(storage, Some(&period))?;
            let start = parse_date(Some(&start))?;
            let end = parse_date(Some(&end))?;
            service.set_override(period, start, end)?;
            println!(
                "Period {} pinned to {} - {}",
                period.key(),
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d")
            );
        }

        PeriodCommands::ClearOverride { period } => {
            let period = resolve_period(storage, Some(&period))?;
            if service.clear_override(period)? {
                println!("Override cleared for {}", period.key());
            } else {
                println!("No override set for {}", period.key());
            }
        }

        PeriodCommands::Overrides => {
            let overrides = service.overrides()?;
            if overrides.is_empty() {
                println!("No period overrides set.");
            } else {
                for ov in overrides {
                    println!(
                        "{}: {} - {}",
                        ov.period.key(),
                        ov.start.format("%Y-%m-%d"),
                        ov.end.format("%Y-%m-%d")
                    );
                }
            }
        }
    }

    Ok(())
}
