//! Savings CLI commands

use clap::Subcommand;

use crate::display::{format_goal_list, format_savings_history};
use crate::error::{QuincenaError, QuincenaResult};
use crate::services::{PeriodService, SavingsService};
use crate::storage::Storage;

use super::{parse_money, resolve_period};

/// Savings subcommands
#[derive(Subcommand)]
pub enum SavingsCommands {
    /// Record this period's deposit (replaces a previous one)
    Deposit {
        /// Amount
        amount: String,
        /// Period as YYYY-MM-C (defaults to the current one)
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Add an extra contribution outside any period
    Extra {
        /// Amount
        amount: String,
    },

    /// Withdraw from the savings pool
    Withdraw {
        /// Amount
        amount: String,
    },

    /// Show the running total and deposit history
    History,

    /// Add a savings goal
    #[command(name = "add-goal")]
    AddGoal {
        /// Goal name
        name: String,
        /// Target amount
        target: String,
    },

    /// Show goals with progress
    Goals,

    /// Delete a savings goal
    #[command(name = "delete-goal")]
    DeleteGoal {
        /// Goal ID
        id: String,
    },
}

/// Handle a savings command
pub fn handle_savings_command(storage: &Storage, cmd: SavingsCommands) -> QuincenaResult<()> {
    let service = SavingsService::new(storage);

    match cmd {
        SavingsCommands::Deposit { amount, period } => {
            let amount = parse_money(&amount)?;
            let period = resolve_period(storage, period.as_deref())?;
            let record = service.deposit(period, amount)?;
            println!(
                "Saved {} for {}",
                record.deposited,
                period.label(PeriodService::new(storage).mode()?)
            );
            println!("Total savings: {}", record.total_after);
        }

        SavingsCommands::Extra { amount } => {
            let amount = parse_money(&amount)?;
            let total = service.add_extra(amount)?;
            println!("Added {} to savings. Total: {}", amount, total);
        }

        SavingsCommands::Withdraw { amount } => {
            let amount = parse_money(&amount)?;
            let total = service.withdraw(amount)?;
            println!("Withdrew {}. Total savings: {}", amount, total);
        }

        SavingsCommands::History => {
            let mode = PeriodService::new(storage).mode()?;
            println!("Total savings: {}\n", service.total()?);
            print!("{}", format_savings_history(&service.history()?, mode));
        }

        SavingsCommands::AddGoal { name, target } => {
            let target = parse_money(&target)?;
            let goal = service.add_goal(name, target)?;
            println!("Added goal: {} ({})", goal.name, goal.target);
            println!("  ID: {}", goal.id);
        }

        SavingsCommands::Goals => {
            print!("{}", format_goal_list(&service.goals()?));
        }

        SavingsCommands::DeleteGoal { id } => {
            let goal_id = service
                .goals()?
                .into_iter()
                .find(|g| g.goal.id.matches(&id))
                .map(|g| g.goal.id)
                .ok_or_else(|| QuincenaError::NotFound {
                    entity_type: "Savings goal",
                    identifier: id.clone(),
                })?;
            service.delete_goal(goal_id)?;
            println!("Deleted goal: {}", id);
        }
    }

    Ok(())
}
