//! Salary CLI commands

use clap::Subcommand;

use crate::error::QuincenaResult;
use crate::services::{PeriodService, SalaryService};
use crate::storage::Storage;

use super::{parse_money, resolve_period};

/// Salary subcommands
#[derive(Subcommand)]
pub enum SalaryCommands {
    /// Set the base salary per period
    Set {
        /// Amount
        amount: String,
    },

    /// Show the base salary and the current period's effective amount
    Show,

    /// Override the salary for one period
    Override {
        /// Amount
        amount: String,
        /// Period as YYYY-MM-C (defaults to the current one)
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Remove a period's override
    #[command(name = "clear-override")]
    ClearOverride {
        /// Period as YYYY-MM-C (defaults to the current one)
        #[arg(short, long)]
        period: Option<String>,
    },
}

/// Handle a salary command
pub fn handle_salary_command(storage: &Storage, cmd: SalaryCommands) -> QuincenaResult<()> {
    let service = SalaryService::new(storage);
    let periods = PeriodService::new(storage);

    match cmd {
        SalaryCommands::Set { amount } => {
            let amount = parse_money(&amount)?;
            service.set_base(amount)?;
            println!("Base salary set to {}", amount);
        }

        SalaryCommands::Show => {
            let mode = periods.mode()?;
            let period = resolve_period(storage, None)?;
            let base = service.base()?;
            let effective = service.effective(period, mode)?;

            println!("Base salary: {}", base);
            if effective != base {
                println!("{}: {} (override)", period.label(mode), effective);
            } else {
                println!("{}: {}", period.label(mode), effective);
            }
        }

        SalaryCommands::Override { amount, period } => {
            let amount = parse_money(&amount)?;
            let period = resolve_period(storage, period.as_deref())?;
            service.set_override(period, amount)?;
            println!(
                "Salary for {} overridden to {}",
                period.label(periods.mode()?),
                amount
            );
        }

        SalaryCommands::ClearOverride { period } => {
            let period = resolve_period(storage, period.as_deref())?;
            if service.clear_override(period)? {
                println!("Override cleared for {}", period.label(periods.mode()?));
            } else {
                println!("No override set for {}", period.label(periods.mode()?));
            }
        }
    }

    Ok(())
}
