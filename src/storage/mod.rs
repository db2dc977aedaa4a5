//! Storage layer for Quincena
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. One repository per entity; the `Storage` coordinator owns them
//! all and handles whole-store load/save.

pub mod categories;
pub mod expenses;
pub mod file_io;
pub mod fixed_payments;
pub mod income;
pub mod init;
pub mod loans;
pub mod period_overrides;
pub mod salary;
pub mod savings;
pub mod settings;

pub use categories::CategoryRepository;
pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use fixed_payments::FixedPaymentRepository;
pub use income::IncomeRepository;
pub use init::initialize_storage;
pub use loans::LoanRepository;
pub use period_overrides::{PeriodOverride, PeriodOverrideRepository};
pub use salary::SalaryRepository;
pub use savings::SavingsRepository;
pub use settings::LedgerSettingsRepository;

use tracing::debug;

use crate::config::paths::QuincenaPaths;
use crate::error::QuincenaError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: QuincenaPaths,
    pub categories: CategoryRepository,
    pub expenses: ExpenseRepository,
    pub fixed_payments: FixedPaymentRepository,
    pub loans: LoanRepository,
    pub income: IncomeRepository,
    pub savings: SavingsRepository,
    pub salary: SalaryRepository,
    pub ledger_settings: LedgerSettingsRepository,
    pub period_overrides: PeriodOverrideRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: QuincenaPaths) -> Result<Self, QuincenaError> {
        // Ensure directories exist
        paths.ensure_directories()?;

        Ok(Self {
            categories: CategoryRepository::new(paths.categories_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            fixed_payments: FixedPaymentRepository::new(paths.fixed_payments_file()),
            loans: LoanRepository::new(paths.loans_file()),
            income: IncomeRepository::new(paths.income_file()),
            savings: SavingsRepository::new(paths.savings_file()),
            salary: SalaryRepository::new(paths.salary_file()),
            ledger_settings: LedgerSettingsRepository::new(paths.ledger_settings_file()),
            period_overrides: PeriodOverrideRepository::new(paths.period_overrides_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &QuincenaPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), QuincenaError> {
        debug!(data_dir = %self.paths.data_dir().display(), "loading store");
        self.categories.load()?;
        self.expenses.load()?;
        self.fixed_payments.load()?;
        self.loans.load()?;
        self.income.load()?;
        self.savings.load()?;
        self.salary.load()?;
        self.ledger_settings.load()?;
        self.period_overrides.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), QuincenaError> {
        debug!(data_dir = %self.paths.data_dir().display(), "saving store");
        self.categories.save()?;
        self.expenses.save()?;
        self.fixed_payments.save()?;
        self.loans.save()?;
        self.income.save()?;
        self.savings.save()?;
        self.salary.save()?;
        self.ledger_settings.save()?;
        self.period_overrides.save()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = QuincenaPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(temp_dir.path().join("backups").exists());
        storage.load_all().unwrap();
        storage.save_all().unwrap();
    }
}
