//! Extra income CLI commands

use clap::Subcommand;

use crate::error::{QuincenaError, QuincenaResult};
use crate::services::IncomeService;
use crate::storage::Storage;

use super::{parse_date, parse_money};

/// Extra income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Record extra income (bonus, freelance, ...)
    Add {
        /// Amount
        amount: String,
        /// Description
        description: String,
        /// Income date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List extra income entries
    List,

    /// Delete an income entry
    Delete {
        /// Income ID
        id: String,
    },
}

/// Handle an income command
pub fn handle_income_command(storage: &Storage, cmd: IncomeCommands) -> QuincenaResult<()> {
    let service = IncomeService::new(storage);

    match cmd {
        IncomeCommands::Add {
            amount,
            description,
            date,
        } => {
            let amount = parse_money(&amount)?;
            let date = parse_date(date.as_deref())?;
            let income = service.add(amount, description, date)?;
            println!("Recorded extra income: {} ({})", income.description, income.amount);
            println!("  ID: {}", income.id);
        }

        IncomeCommands::List => {
            let entries = service.list()?;
            if entries.is_empty() {
                println!("No extra income recorded.");
            } else {
                for entry in entries {
                    println!(
                        "{} {:25} {:>14}  {}",
                        entry.date.format("%Y-%m-%d"),
                        entry.description,
                        entry.amount.to_string(),
                        entry.id
                    );
                }
            }
        }

        IncomeCommands::Delete { id } => {
            let income_id = storage
                .income
                .get_all()?
                .into_iter()
                .find(|i| i.id.matches(&id))
                .map(|i| i.id)
                .ok_or_else(|| QuincenaError::NotFound {
                    entity_type: "Income",
                    identifier: id.clone(),
                })?;
            service.delete(income_id)?;
            println!("Deleted income entry: {}", id);
        }
    }

    Ok(())
}
