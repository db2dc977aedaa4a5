use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use quincena::backup::BackupManager;
use quincena::cli::{
    handle_backup_command, handle_category_command, handle_dashboard_command,
    handle_expense_command, handle_export_command, handle_fixed_command, handle_income_command,
    handle_loan_command, handle_period_command, handle_salary_command, handle_savings_command,
};
use quincena::config::{paths::QuincenaPaths, settings::Settings};
use quincena::storage::Storage;

#[derive(Parser)]
#[command(
    name = "quincena",
    version,
    about = "Personal budgeting around quincenal pay cycles",
    long_about = "Quincena is a single-user budgeting tool built around the \
                  Dominican quincenal pay schedule (two pay periods per month), \
                  with an optional monthly mode. It tracks expenses, fixed \
                  payments, loans, and savings per period, and tells you how \
                  much money you actually have left."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the dashboard for a period (default: the current one)
    #[command(alias = "dash")]
    Dashboard {
        /// Period as YYYY-MM-C
        period: Option<String>,
    },

    /// Expense management commands
    #[command(subcommand, alias = "gasto")]
    Expense(quincena::cli::ExpenseCommands),

    /// Fixed payment management commands
    #[command(subcommand)]
    Fixed(quincena::cli::FixedCommands),

    /// Loan management commands
    #[command(subcommand)]
    Loan(quincena::cli::LoanCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(quincena::cli::CategoryCommands),

    /// Savings management commands
    #[command(subcommand, alias = "ahorro")]
    Savings(quincena::cli::SavingsCommands),

    /// Salary configuration commands
    #[command(subcommand)]
    Salary(quincena::cli::SalaryCommands),

    /// Extra income commands
    #[command(subcommand)]
    Income(quincena::cli::IncomeCommands),

    /// Period resolution and configuration commands
    #[command(subcommand)]
    Period(quincena::cli::PeriodCommands),

    /// Export a period's expenses to CSV
    Export(quincena::cli::export::ExportArgs),

    /// Backup management commands
    #[command(subcommand)]
    Backup(quincena::cli::BackupCommands),

    /// Initialize data files and default categories
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = QuincenaPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    if let Some(Commands::Init) = cli.command {
        println!("Initializing Quincena at: {}", paths.base_dir().display());
        quincena::storage::init::initialize_storage(&paths)?;
        settings.save(&paths)?;
        println!("Initialization complete!");
        println!();
        println!("Default categories have been created:");
        println!("  Comida, Combustible, Uber/Taxi, Subscripciones, Varios/Snacks, Otros");
        println!();
        println!("Set your salary with 'quincena salary set <amount>'.");
        return Ok(());
    }

    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    // Rolling safety net; a failed backup must not block the command itself
    if settings.auto_backup && paths.is_initialized() {
        let manager = BackupManager::new(paths.clone(), settings.backup_retention);
        if let Err(e) = manager.create_backup_with_retention() {
            tracing::warn!(error = %e, "automatic backup failed");
        }
    }

    match cli.command {
        Some(Commands::Dashboard { period }) => {
            handle_dashboard_command(&storage, period.as_deref())?;
        }
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, cmd)?;
        }
        Some(Commands::Fixed(cmd)) => {
            handle_fixed_command(&storage, cmd)?;
        }
        Some(Commands::Loan(cmd)) => {
            handle_loan_command(&storage, cmd)?;
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(&storage, cmd)?;
        }
        Some(Commands::Savings(cmd)) => {
            handle_savings_command(&storage, cmd)?;
        }
        Some(Commands::Salary(cmd)) => {
            handle_salary_command(&storage, cmd)?;
        }
        Some(Commands::Income(cmd)) => {
            handle_income_command(&storage, cmd)?;
        }
        Some(Commands::Period(cmd)) => {
            handle_period_command(&storage, cmd)?;
        }
        Some(Commands::Export(args)) => {
            handle_export_command(&storage, args)?;
        }
        Some(Commands::Backup(cmd)) => {
            handle_backup_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Init) => unreachable!("handled above"),
        Some(Commands::Config) => {
            println!("Quincena Configuration");
            println!("======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!();
            println!("Settings:");
            println!("  Backup retention: {}", settings.backup_retention);
            println!("  Auto backup:      {}", settings.auto_backup);
            println!();
            println!("Period mode: {}", storage.ledger_settings.period_mode()?);
        }
        None => {
            handle_dashboard_command(&storage, None)?;
        }
    }

    Ok(())
}
