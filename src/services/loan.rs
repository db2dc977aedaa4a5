//! Loan service
//!
//! CRUD for loans plus the funding side effects applied at creation:
//! `from-savings` loans withdraw from the savings pool, `as-expense` loans
//! persist a companion expense row. Neither kind is deducted again by the
//! dashboard.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::{QuincenaError, QuincenaResult};
use crate::models::{Category, DeductionType, FundingSource, Loan, LoanId, Money};
use crate::storage::Storage;

use super::expense::ExpenseService;
use super::savings::SavingsService;

/// Category names the companion expense row is filed under, in order of
/// preference
const COMPANION_CATEGORIES: [&str; 2] = ["Prestamos", "Otros"];

/// Service for loan management
pub struct LoanService<'a> {
    storage: &'a Storage,
}

impl<'a> LoanService<'a> {
    /// Create a new loan service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a new loan, applying its funding side effect
    pub fn add(
        &self,
        person: impl Into<String>,
        amount: Money,
        description: impl Into<String>,
        date: NaiveDate,
        deduction: DeductionType,
    ) -> QuincenaResult<Loan> {
        let loan = Loan::new(person, amount, description, date, deduction);
        loan.validate()?;

        match deduction {
            DeductionType::None => {
                self.persist(&loan)?;
            }
            DeductionType::FromSavings => {
                // Withdraw first so an insufficient pool declines the loan
                let savings = SavingsService::new(self.storage);
                savings.withdraw(amount)?;

                if let Err(e) = self.persist(&loan) {
                    warn!(id = %loan.id, error = %e, "loan persist failed, rolling back withdrawal");
                    savings.restore(amount)?;
                    return Err(e);
                }
            }
            DeductionType::AsExpense => {
                self.persist(&loan)?;

                let category = self.companion_category()?;
                let expenses = ExpenseService::new(self.storage);
                let result = expenses.add(
                    amount,
                    format!("Prestamo a {}", loan.person),
                    date,
                    FundingSource::Salary,
                    vec![category.id],
                );
                if let Err(e) = result {
                    warn!(id = %loan.id, error = %e, "companion expense failed, removing loan");
                    self.storage.loans.delete(loan.id)?;
                    self.storage.loans.save()?;
                    return Err(e);
                }
            }
        }

        info!(id = %loan.id, person = %loan.person, deduction = %loan.deduction, "loan added");
        Ok(loan)
    }

    fn persist(&self, loan: &Loan) -> QuincenaResult<()> {
        self.storage.loans.upsert(loan.clone())?;
        self.storage.loans.save()
    }

    /// The category the companion expense is filed under ("Prestamos" when it
    /// exists, else "Otros", created on demand)
    fn companion_category(&self) -> QuincenaResult<Category> {
        for name in COMPANION_CATEGORIES {
            if let Some(category) = self.storage.categories.get_by_name(name)? {
                return Ok(category);
            }
        }

        let category = Category::new(COMPANION_CATEGORIES[1]);
        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;
        Ok(category)
    }

    /// Mark a loan repaid on the given date
    pub fn mark_paid(&self, id: LoanId, date: NaiveDate) -> QuincenaResult<Loan> {
        let mut loan = self.get(id)?;
        loan.mark_paid(date);
        self.persist(&loan)?;
        info!(%id, "loan marked paid");
        Ok(loan)
    }

    /// Mark a loan unpaid again
    pub fn mark_unpaid(&self, id: LoanId) -> QuincenaResult<Loan> {
        let mut loan = self.get(id)?;
        loan.mark_unpaid();
        self.persist(&loan)?;
        info!(%id, "loan marked unpaid");
        Ok(loan)
    }

    /// Update basic fields (the funding side effect is not re-applied)
    pub fn update(
        &self,
        id: LoanId,
        person: Option<String>,
        amount: Option<Money>,
        description: Option<String>,
        date: Option<NaiveDate>,
    ) -> QuincenaResult<Loan> {
        let mut loan = self.get(id)?;

        if let Some(person) = person {
            loan.person = person;
        }
        if let Some(amount) = amount {
            loan.amount = amount;
        }
        if let Some(description) = description {
            loan.description = description;
        }
        if let Some(date) = date {
            loan.date = date;
        }
        loan.validate()?;

        self.persist(&loan)?;
        info!(%id, "loan updated");
        Ok(loan)
    }

    /// Delete a loan
    pub fn delete(&self, id: LoanId) -> QuincenaResult<()> {
        if !self.storage.loans.delete(id)? {
            return Err(QuincenaError::loan_not_found(id.to_string()));
        }
        self.storage.loans.save()?;
        info!(%id, "loan deleted");
        Ok(())
    }

    /// Get a loan by id
    pub fn get(&self, id: LoanId) -> QuincenaResult<Loan> {
        self.storage
            .loans
            .get(id)?
            .ok_or_else(|| QuincenaError::loan_not_found(id.to_string()))
    }

    /// List loans, newest first
    pub fn list(&self, unpaid_only: bool) -> QuincenaResult<Vec<Loan>> {
        if unpaid_only {
            self.storage.loans.get_unpaid()
        } else {
            self.storage.loans.get_all()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::QuincenaPaths;
    use crate::models::Period;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = QuincenaPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_plain_loan() {
        let (_tmp, storage) = setup();
        let service = LoanService::new(&storage);

        let loan = service
            .add(
                "Maria",
                Money::from_cents(50000),
                "",
                date(2024, 4, 10),
                DeductionType::None,
            )
            .unwrap();

        assert!(loan.affects_budget());
        assert_eq!(
            storage.loans.total_affecting_budget().unwrap().cents(),
            50000
        );
    }

    #[test]
    fn test_from_savings_withdraws_and_declines() {
        let (_tmp, storage) = setup();
        let savings = SavingsService::new(&storage);
        savings
            .deposit(Period::new(2024, 4, 1), Money::from_cents(60000))
            .unwrap();

        let service = LoanService::new(&storage);
        service
            .add(
                "Pedro",
                Money::from_cents(40000),
                "",
                date(2024, 4, 10),
                DeductionType::FromSavings,
            )
            .unwrap();
        assert_eq!(savings.total().unwrap().cents(), 20000);

        // A second loan beyond the pool is declined and not persisted
        let err = service
            .add(
                "Juan",
                Money::from_cents(30000),
                "",
                date(2024, 4, 11),
                DeductionType::FromSavings,
            )
            .unwrap_err();
        assert!(err.is_declined());
        assert_eq!(service.list(false).unwrap().len(), 1);
        assert_eq!(savings.total().unwrap().cents(), 20000);
    }

    #[test]
    fn test_as_expense_creates_companion_row() {
        let (_tmp, storage) = setup();
        let service = LoanService::new(&storage);

        service
            .add(
                "Luis",
                Money::from_cents(25000),
                "",
                date(2024, 4, 10),
                DeductionType::AsExpense,
            )
            .unwrap();

        let expenses = storage.expenses.get_all().unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].description, "Prestamo a Luis");
        assert_eq!(expenses[0].amount.cents(), 25000);

        // The companion category was created on demand
        assert!(storage.categories.get_by_name("Otros").unwrap().is_some());

        // The loan itself does not deduct on the dashboard
        assert_eq!(storage.loans.total_affecting_budget().unwrap().cents(), 0);
    }

    #[test]
    fn test_paid_lifecycle() {
        let (_tmp, storage) = setup();
        let service = LoanService::new(&storage);

        let loan = service
            .add(
                "Maria",
                Money::from_cents(50000),
                "",
                date(2024, 4, 10),
                DeductionType::None,
            )
            .unwrap();

        let paid = service.mark_paid(loan.id, date(2024, 4, 20)).unwrap();
        assert!(paid.paid);
        assert!(service.list(true).unwrap().is_empty());

        let unpaid = service.mark_unpaid(loan.id).unwrap();
        assert!(!unpaid.paid);
        assert_eq!(service.list(true).unwrap().len(), 1);
    }
}
