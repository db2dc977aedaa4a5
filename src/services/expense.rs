//! Expense service
//!
//! CRUD for expenses. Savings-funded expenses withdraw from the savings pool
//! before persisting; if the persist step fails the withdrawal is rolled
//! back, so the pool never loses money to a failed insert.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::{QuincenaError, QuincenaResult};
use crate::models::{CategoryId, Expense, ExpenseId, FundingSource, Money};
use crate::storage::Storage;

use super::savings::SavingsService;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a new expense
    ///
    /// Savings-funded expenses withdraw the amount first (declined when the
    /// pool is too small), then persist; a failed persist rolls the
    /// withdrawal back.
    pub fn add(
        &self,
        amount: Money,
        description: impl Into<String>,
        date: NaiveDate,
        funding: FundingSource,
        category_ids: Vec<CategoryId>,
    ) -> QuincenaResult<Expense> {
        self.verify_categories(&category_ids)?;

        let expense = Expense::new(amount, description, date, funding, category_ids);
        expense.validate()?;

        if funding == FundingSource::Savings {
            let savings = SavingsService::new(self.storage);
            savings.withdraw(amount)?;

            if let Err(e) = self.persist(&expense) {
                warn!(id = %expense.id, error = %e, "expense persist failed, rolling back withdrawal");
                savings.restore(amount)?;
                return Err(e);
            }
        } else {
            self.persist(&expense)?;
        }

        info!(id = %expense.id, amount = %expense.amount, funding = %expense.funding, "expense added");
        Ok(expense)
    }

    fn persist(&self, expense: &Expense) -> QuincenaResult<()> {
        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()
    }

    /// Update an existing expense (funding source cannot change)
    pub fn update(
        &self,
        id: ExpenseId,
        amount: Option<Money>,
        description: Option<String>,
        date: Option<NaiveDate>,
        category_ids: Option<Vec<CategoryId>>,
    ) -> QuincenaResult<Expense> {
        let mut expense = self.get(id)?;

        if let Some(amount) = amount {
            expense.amount = amount;
        }
        if let Some(description) = description {
            expense.description = description;
        }
        if let Some(date) = date {
            expense.date = date;
        }
        if let Some(category_ids) = category_ids {
            self.verify_categories(&category_ids)?;
            expense.category_ids = category_ids;
        }
        expense.validate()?;

        self.persist(&expense)?;
        info!(id = %expense.id, "expense updated");
        Ok(expense)
    }

    /// Delete an expense
    pub fn delete(&self, id: ExpenseId) -> QuincenaResult<()> {
        if !self.storage.expenses.delete(id)? {
            return Err(QuincenaError::expense_not_found(id.to_string()));
        }
        self.storage.expenses.save()?;
        info!(%id, "expense deleted");
        Ok(())
    }

    /// Get an expense by id
    pub fn get(&self, id: ExpenseId) -> QuincenaResult<Expense> {
        self.storage
            .expenses
            .get(id)?
            .ok_or_else(|| QuincenaError::expense_not_found(id.to_string()))
    }

    /// All expenses, newest first
    pub fn list(&self) -> QuincenaResult<Vec<Expense>> {
        self.storage.expenses.get_all()
    }

    /// Expenses dated inside [start, end], oldest first
    pub fn list_in_range(&self, start: NaiveDate, end: NaiveDate) -> QuincenaResult<Vec<Expense>> {
        self.storage.expenses.get_in_range(start, end)
    }

    fn verify_categories(&self, category_ids: &[CategoryId]) -> QuincenaResult<()> {
        for id in category_ids {
            self.storage
                .categories
                .get(*id)?
                .ok_or_else(|| QuincenaError::category_not_found(id.to_string()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::QuincenaPaths;
    use crate::models::{Category, Period};
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage, CategoryId) {
        let temp_dir = TempDir::new().unwrap();
        let paths = QuincenaPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let category = Category::new("Comida");
        let cat_id = category.id;
        storage.categories.upsert(category).unwrap();

        (temp_dir, storage, cat_id)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_add_salary_funded() {
        let (_tmp, storage, cat_id) = setup();
        let service = ExpenseService::new(&storage);

        let expense = service
            .add(
                Money::from_cents(50000),
                "Supermercado",
                date(2024, 4, 10),
                FundingSource::Salary,
                vec![cat_id],
            )
            .unwrap();

        assert_eq!(service.get(expense.id).unwrap().description, "Supermercado");
    }

    #[test]
    fn test_savings_funded_withdraws_pool() {
        let (_tmp, storage, cat_id) = setup();
        let savings = SavingsService::new(&storage);
        savings
            .deposit(Period::new(2024, 4, 1), Money::from_cents(100000))
            .unwrap();

        let service = ExpenseService::new(&storage);
        service
            .add(
                Money::from_cents(30000),
                "Farmacia",
                date(2024, 4, 10),
                FundingSource::Savings,
                vec![cat_id],
            )
            .unwrap();

        assert_eq!(savings.total().unwrap().cents(), 70000);
    }

    #[test]
    fn test_savings_funded_declined_on_insufficient_pool() {
        let (_tmp, storage, cat_id) = setup();
        let service = ExpenseService::new(&storage);

        let err = service
            .add(
                Money::from_cents(30000),
                "Farmacia",
                date(2024, 4, 10),
                FundingSource::Savings,
                vec![cat_id],
            )
            .unwrap_err();

        assert!(err.is_declined());
        // Nothing was persisted
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_category_rejected() {
        let (_tmp, storage, _cat_id) = setup();
        let service = ExpenseService::new(&storage);

        let err = service
            .add(
                Money::from_cents(50000),
                "Supermercado",
                date(2024, 4, 10),
                FundingSource::Salary,
                vec![CategoryId::new()],
            )
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_update_and_delete() {
        let (_tmp, storage, cat_id) = setup();
        let service = ExpenseService::new(&storage);

        let expense = service
            .add(
                Money::from_cents(50000),
                "Supermercado",
                date(2024, 4, 10),
                FundingSource::Salary,
                vec![cat_id],
            )
            .unwrap();

        let updated = service
            .update(
                expense.id,
                Some(Money::from_cents(60000)),
                None,
                Some(date(2024, 4, 11)),
                None,
            )
            .unwrap();
        assert_eq!(updated.amount.cents(), 60000);
        assert_eq!(updated.date, date(2024, 4, 11));
        assert_eq!(updated.description, "Supermercado");

        service.delete(expense.id).unwrap();
        assert!(service.get(expense.id).unwrap_err().is_not_found());
        assert!(service.delete(expense.id).unwrap_err().is_not_found());
    }
}
