//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod backup;
pub mod category;
pub mod dashboard;
pub mod expense;
pub mod export;
pub mod fixed_payment;
pub mod income;
pub mod loan;
pub mod period;
pub mod salary;
pub mod savings;

pub use backup::{handle_backup_command, BackupCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use dashboard::handle_dashboard_command;
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::handle_export_command;
pub use fixed_payment::{handle_fixed_command, FixedCommands};
pub use income::{handle_income_command, IncomeCommands};
pub use loan::{handle_loan_command, LoanCommands};
pub use period::{handle_period_command, PeriodCommands};
pub use salary::{handle_salary_command, SalaryCommands};
pub use savings::{handle_savings_command, SavingsCommands};

use chrono::NaiveDate;

use crate::error::{QuincenaError, QuincenaResult};
use crate::models::{Money, Period};
use crate::services::PeriodService;
use crate::storage::Storage;

/// Parse a `YYYY-MM-DD` date argument, defaulting to today
pub(crate) fn parse_date(arg: Option<&str>) -> QuincenaResult<NaiveDate> {
    match arg {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| QuincenaError::validation("date", format!("'{}' is not YYYY-MM-DD", s))),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

/// Parse an amount argument ("1500", "1,500.50", "RD$1500")
pub(crate) fn parse_money(s: &str) -> QuincenaResult<Money> {
    Money::parse(s).map_err(|e| QuincenaError::validation("amount", e.to_string()))
}

/// Resolve a period argument (`YYYY-MM-C`), defaulting to today's period
pub(crate) fn resolve_period(storage: &Storage, arg: Option<&str>) -> QuincenaResult<Period> {
    match arg {
        Some(s) => s
            .parse()
            .map_err(|_| QuincenaError::validation("period", format!("'{}' is not YYYY-MM-C", s))),
        None => {
            let today = chrono::Local::now().date_naive();
            PeriodService::new(storage).current_period(today)
        }
    }
}
