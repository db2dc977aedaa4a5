//! Expense CLI commands

use std::collections::HashMap;

use clap::Subcommand;

use crate::display::format_expense_list;
use crate::error::{QuincenaError, QuincenaResult};
use crate::models::{CategoryId, FundingSource};
use crate::services::{CategoryService, ExpenseService, PeriodService};
use crate::storage::Storage;

use super::{parse_date, parse_money, resolve_period};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Add a new expense
    Add {
        /// Amount (e.g. "350" or "1,250.50")
        amount: String,
        /// Description
        description: String,
        /// Category names, comma separated
        #[arg(short, long)]
        categories: String,
        /// Expense date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Pay from the savings pool instead of salary
        #[arg(long)]
        from_savings: bool,
    },

    /// List expenses for a period (defaults to the current one)
    List {
        /// Period as YYYY-MM-C
        #[arg(short, long)]
        period: Option<String>,
        /// List every expense regardless of period
        #[arg(long)]
        all: bool,
    },

    /// Edit an expense
    Edit {
        /// Expense ID
        id: String,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New category names, comma separated
        #[arg(short, long)]
        categories: Option<String>,
    },

    /// Delete an expense
    Delete {
        /// Expense ID
        id: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(storage: &Storage, cmd: ExpenseCommands) -> QuincenaResult<()> {
    let service = ExpenseService::new(storage);

    match cmd {
        ExpenseCommands::Add {
            amount,
            description,
            categories,
            date,
            from_savings,
        } => {
            let amount = parse_money(&amount)?;
            let date = parse_date(date.as_deref())?;
            let category_ids = resolve_categories(storage, &categories)?;
            let funding = if from_savings {
                FundingSource::Savings
            } else {
                FundingSource::Salary
            };

            let expense = service.add(amount, description, date, funding, category_ids)?;
            println!("Added expense: {} ({})", expense.description, expense.amount);
            println!("  ID: {}", expense.id);
            if from_savings {
                println!("  Paid from savings pool");
            }
        }

        ExpenseCommands::List { period, all } => {
            let expenses = if all {
                service.list()?
            } else {
                let period = resolve_period(storage, period.as_deref())?;
                let (start, end) = PeriodService::new(storage).resolve_range(period)?;
                service.list_in_range(start, end)?
            };
            print!("{}", format_expense_list(&expenses, &category_names(storage)?));
        }

        ExpenseCommands::Edit {
            id,
            amount,
            description,
            date,
            categories,
        } => {
            let expense = find_expense(storage, &id)?;

            let amount = amount.as_deref().map(parse_money).transpose()?;
            let date = date.as_deref().map(|d| parse_date(Some(d))).transpose()?;
            let category_ids = categories
                .as_deref()
                .map(|c| resolve_categories(storage, c))
                .transpose()?;

            let updated = service.update(expense, amount, description, date, category_ids)?;
            println!("Updated expense: {} ({})", updated.description, updated.amount);
        }

        ExpenseCommands::Delete { id } => {
            let expense = find_expense(storage, &id)?;
            service.delete(expense)?;
            println!("Deleted expense: {}", id);
        }
    }

    Ok(())
}

/// Resolve a comma-separated list of category names to ids
fn resolve_categories(storage: &Storage, arg: &str) -> QuincenaResult<Vec<CategoryId>> {
    let service = CategoryService::new(storage);
    arg.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|name| service.get_by_name(name).map(|c| c.id))
        .collect()
}

fn find_expense(storage: &Storage, arg: &str) -> QuincenaResult<crate::models::ExpenseId> {
    storage
        .expenses
        .get_all()?
        .into_iter()
        .find(|e| e.id.matches(arg))
        .map(|e| e.id)
        .ok_or_else(|| QuincenaError::expense_not_found(arg.to_string()))
}

fn category_names(
    storage: &Storage,
) -> QuincenaResult<HashMap<CategoryId, String>> {
    Ok(storage
        .categories
        .get_all()?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect())
}
