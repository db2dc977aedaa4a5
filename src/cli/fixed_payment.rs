//! Fixed payment CLI commands

use clap::Subcommand;

use crate::display::format_fixed_payment_list;
use crate::error::{QuincenaError, QuincenaResult};
use crate::services::{CategoryService, FixedPaymentService};
use crate::storage::Storage;

use super::parse_money;

/// Fixed payment subcommands
#[derive(Subcommand)]
pub enum FixedCommands {
    /// Add a recurring payment
    Add {
        /// Payment name
        name: String,
        /// Amount
        amount: String,
        /// Day of the month it is due (1-31, clamped in short months)
        #[arg(short, long)]
        day: u32,
        /// Category name
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List fixed payments
    List {
        /// Include deactivated payments
        #[arg(long)]
        all: bool,
    },

    /// Edit a fixed payment
    Edit {
        /// Payment ID
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New due day
        #[arg(short, long)]
        day: Option<u32>,
    },

    /// Deactivate a fixed payment (history is kept)
    Remove {
        /// Payment ID
        id: String,
    },
}

/// Handle a fixed payment command
pub fn handle_fixed_command(storage: &Storage, cmd: FixedCommands) -> QuincenaResult<()> {
    let service = FixedPaymentService::new(storage);

    match cmd {
        FixedCommands::Add {
            name,
            amount,
            day,
            category,
        } => {
            let amount = parse_money(&amount)?;
            let category_id = category
                .as_deref()
                .map(|name| CategoryService::new(storage).get_by_name(name).map(|c| c.id))
                .transpose()?;

            let payment = service.add(name, amount, day, category_id)?;
            println!(
                "Added fixed payment: {} ({}, day {})",
                payment.name, payment.amount, payment.due_day
            );
            println!("  ID: {}", payment.id);
        }

        FixedCommands::List { all } => {
            let payments = service.list(all)?;
            print!("{}", format_fixed_payment_list(&payments));
        }

        FixedCommands::Edit {
            id,
            name,
            amount,
            day,
        } => {
            let payment_id = find_payment(storage, &id)?;
            let amount = amount.as_deref().map(parse_money).transpose()?;

            let updated = service.update(payment_id, name, amount, day, None)?;
            println!("Updated fixed payment: {}", updated.name);
        }

        FixedCommands::Remove { id } => {
            let payment_id = find_payment(storage, &id)?;
            let payment = service.deactivate(payment_id)?;
            println!("Deactivated fixed payment: {}", payment.name);
        }
    }

    Ok(())
}

fn find_payment(storage: &Storage, arg: &str) -> QuincenaResult<crate::models::FixedPaymentId> {
    storage
        .fixed_payments
        .get_all()?
        .into_iter()
        .find(|p| p.id.matches(arg))
        .map(|p| p.id)
        .ok_or_else(|| QuincenaError::fixed_payment_not_found(arg.to_string()))
}
