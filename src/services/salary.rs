//! Salary service
//!
//! Base salary plus optional per-period overrides. Overrides only apply in
//! quincenal mode; monthly periods always use the base amount.

use tracing::info;

use crate::error::{QuincenaError, QuincenaResult};
use crate::models::{Money, Period, PeriodMode};
use crate::storage::Storage;

/// Service for salary configuration
pub struct SalaryService<'a> {
    storage: &'a Storage,
}

impl<'a> SalaryService<'a> {
    /// Create a new salary service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// The configured base salary per period
    pub fn base(&self) -> QuincenaResult<Money> {
        self.storage.salary.base()
    }

    /// Set the base salary
    pub fn set_base(&self, amount: Money) -> QuincenaResult<()> {
        if amount.is_negative() {
            return Err(QuincenaError::validation("salary", "cannot be negative"));
        }
        self.storage.salary.set_base(amount)?;
        self.storage.salary.save()?;
        info!(amount = %amount, "base salary set");
        Ok(())
    }

    /// Override the salary for one specific period
    pub fn set_override(&self, period: Period, amount: Money) -> QuincenaResult<()> {
        if amount.is_negative() {
            return Err(QuincenaError::validation("salary", "cannot be negative"));
        }
        self.storage.salary.set_override(period, amount)?;
        self.storage.salary.save()?;
        info!(period = %period, amount = %amount, "salary override set");
        Ok(())
    }

    /// Remove a period's salary override
    pub fn clear_override(&self, period: Period) -> QuincenaResult<bool> {
        let removed = self.storage.salary.clear_override(period)?;
        if removed {
            self.storage.salary.save()?;
            info!(period = %period, "salary override cleared");
        }
        Ok(removed)
    }

    /// The salary in effect for a period: its override when one exists (and
    /// the mode is quincenal), else the base
    pub fn effective(&self, period: Period, mode: PeriodMode) -> QuincenaResult<Money> {
        if mode == PeriodMode::Quincenal {
            if let Some(amount) = self.storage.salary.override_for(period)? {
                return Ok(amount);
            }
        }
        self.base()
    }
}
