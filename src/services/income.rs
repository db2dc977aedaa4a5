//! Extra income service
//!
//! One-off income entries (bonuses, freelance work) dated so they land in a
//! period and raise that period's starting money.

use chrono::NaiveDate;
use tracing::info;

use crate::error::{QuincenaError, QuincenaResult};
use crate::models::{ExtraIncome, IncomeId, Money};
use crate::storage::Storage;

/// Service for extra income management
pub struct IncomeService<'a> {
    storage: &'a Storage,
}

impl<'a> IncomeService<'a> {
    /// Create a new income service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record an extra income entry
    pub fn add(
        &self,
        amount: Money,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> QuincenaResult<ExtraIncome> {
        let income = ExtraIncome::new(amount, description, date);
        income.validate()?;

        self.storage.income.upsert(income.clone())?;
        self.storage.income.save()?;
        info!(id = %income.id, amount = %income.amount, "extra income added");

        Ok(income)
    }

    /// Delete an income entry
    pub fn delete(&self, id: IncomeId) -> QuincenaResult<()> {
        if !self.storage.income.delete(id)? {
            return Err(QuincenaError::NotFound {
                entity_type: "Income",
                identifier: id.to_string(),
            });
        }
        self.storage.income.save()?;
        info!(%id, "extra income deleted");
        Ok(())
    }

    /// All income entries, newest first
    pub fn list(&self) -> QuincenaResult<Vec<ExtraIncome>> {
        self.storage.income.get_all()
    }

    /// Total extra income dated inside [start, end]
    pub fn total_in_range(&self, start: NaiveDate, end: NaiveDate) -> QuincenaResult<Money> {
        self.storage.income.total_in_range(start, end)
    }
}
