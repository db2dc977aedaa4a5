//! Loan CLI commands

use clap::Subcommand;

use crate::display::format_loan_list;
use crate::error::{QuincenaError, QuincenaResult};
use crate::models::DeductionType;
use crate::services::LoanService;
use crate::storage::Storage;

use super::{parse_date, parse_money};

/// Loan subcommands
#[derive(Subcommand)]
pub enum LoanCommands {
    /// Record money lent to someone
    Add {
        /// Who the money went to
        person: String,
        /// Amount
        amount: String,
        /// Description
        #[arg(long, default_value = "")]
        description: String,
        /// Loan date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// How the amount leaves the budget: none, as-expense, from-savings
        #[arg(long, default_value = "none")]
        deduction: String,
    },

    /// List loans
    List {
        /// Only unpaid loans
        #[arg(long)]
        unpaid: bool,
    },

    /// Mark a loan repaid
    Paid {
        /// Loan ID
        id: String,
        /// Repayment date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Mark a loan unpaid again
    Unpaid {
        /// Loan ID
        id: String,
    },

    /// Delete a loan
    Delete {
        /// Loan ID
        id: String,
    },
}

/// Handle a loan command
pub fn handle_loan_command(storage: &Storage, cmd: LoanCommands) -> QuincenaResult<()> {
    let service = LoanService::new(storage);

    match cmd {
        LoanCommands::Add {
            person,
            amount,
            description,
            date,
            deduction,
        } => {
            let amount = parse_money(&amount)?;
            let date = parse_date(date.as_deref())?;
            let deduction: DeductionType = deduction.parse().map_err(|_| {
                QuincenaError::validation(
                    "deduction",
                    format!("'{}' is not none, as-expense, or from-savings", deduction),
                )
            })?;

            let loan = service.add(person, amount, description, date, deduction)?;
            println!("Recorded loan to {}: {}", loan.person, loan.amount);
            println!("  ID: {}", loan.id);
            match loan.deduction {
                DeductionType::AsExpense => println!("  Deducted as an expense"),
                DeductionType::FromSavings => println!("  Withdrawn from savings"),
                DeductionType::None => {}
            }
        }

        LoanCommands::List { unpaid } => {
            let loans = service.list(unpaid)?;
            print!("{}", format_loan_list(&loans));
        }

        LoanCommands::Paid { id, date } => {
            let loan_id = find_loan(storage, &id)?;
            let date = parse_date(date.as_deref())?;
            let loan = service.mark_paid(loan_id, date)?;
            println!("Marked loan to {} as paid", loan.person);
        }

        LoanCommands::Unpaid { id } => {
            let loan_id = find_loan(storage, &id)?;
            let loan = service.mark_unpaid(loan_id)?;
            println!("Marked loan to {} as unpaid", loan.person);
        }

        LoanCommands::Delete { id } => {
            let loan_id = find_loan(storage, &id)?;
            service.delete(loan_id)?;
            println!("Deleted loan: {}", id);
        }
    }

    Ok(())
}

fn find_loan(storage: &Storage, arg: &str) -> QuincenaResult<crate::models::LoanId> {
    storage
        .loans
        .get_all()?
        .into_iter()
        .find(|l| l.id.matches(arg))
        .map(|l| l.id)
        .ok_or_else(|| QuincenaError::loan_not_found(arg.to_string()))
}
