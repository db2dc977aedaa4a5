//! Savings service
//!
//! Period deposits, extra contributions, withdrawals with insufficient-funds
//! decline, and savings goals measured against the running total.

use tracing::info;

use crate::error::{QuincenaError, QuincenaResult};
use crate::models::{GoalId, Money, Period, SavingsGoal, SavingsRecord};
use crate::storage::Storage;

/// A goal with its progress against the running total
#[derive(Debug, Clone)]
pub struct GoalProgress {
    pub goal: SavingsGoal,
    pub saved: Money,
    pub fraction: f64,
}

/// Service for savings management
pub struct SavingsService<'a> {
    storage: &'a Storage,
}

impl<'a> SavingsService<'a> {
    /// Create a new savings service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Current running total
    pub fn total(&self) -> QuincenaResult<Money> {
        self.storage.savings.total()
    }

    /// The deposit recorded for a period (zero when none)
    pub fn period_deposit(&self, period: Period) -> QuincenaResult<Money> {
        Ok(self
            .storage
            .savings
            .record_for(period)?
            .map(|r| r.deposited)
            .unwrap_or_default())
    }

    /// Record a period's deposit
    ///
    /// A repeat deposit in the same period replaces the recorded deposit and
    /// still bumps the running total by the full new amount.
    pub fn deposit(&self, period: Period, amount: Money) -> QuincenaResult<SavingsRecord> {
        if !amount.is_positive() {
            return Err(QuincenaError::validation("amount", "must be positive"));
        }

        let total = self.storage.savings.total()? + amount;
        let record = SavingsRecord::new(period, amount, total);
        self.storage.savings.put_record(record.clone(), total)?;
        self.storage.savings.save()?;
        info!(period = %period, amount = %amount, total = %total, "savings deposit recorded");

        Ok(record)
    }

    /// Extra contribution: bumps the running total without touching any
    /// period's recorded deposit
    pub fn add_extra(&self, amount: Money) -> QuincenaResult<Money> {
        if !amount.is_positive() {
            return Err(QuincenaError::validation("amount", "must be positive"));
        }

        let total = self.storage.savings.total()? + amount;
        self.storage.savings.set_total(total)?;
        self.storage.savings.save()?;
        info!(amount = %amount, total = %total, "extra savings added");

        Ok(total)
    }

    /// Withdraw from the running total; declined when the pool is too small
    pub fn withdraw(&self, amount: Money) -> QuincenaResult<Money> {
        if !amount.is_positive() {
            return Err(QuincenaError::validation("amount", "must be positive"));
        }

        let current = self.storage.savings.total()?;
        if amount > current {
            return Err(QuincenaError::InsufficientFunds {
                requested: amount.cents(),
                available: current.cents(),
            });
        }

        let total = current - amount;
        self.storage.savings.set_total(total)?;
        self.storage.savings.save()?;
        info!(amount = %amount, total = %total, "savings withdrawal");

        Ok(total)
    }

    /// Restore a previous withdrawal (used to roll back failed multi-step
    /// operations); does not decline
    pub(crate) fn restore(&self, amount: Money) -> QuincenaResult<Money> {
        let total = self.storage.savings.total()? + amount;
        self.storage.savings.set_total(total)?;
        self.storage.savings.save()?;
        Ok(total)
    }

    /// All deposit records, oldest first
    pub fn history(&self) -> QuincenaResult<Vec<SavingsRecord>> {
        self.storage.savings.all_records()
    }

    /// Add a savings goal
    pub fn add_goal(&self, name: impl Into<String>, target: Money) -> QuincenaResult<SavingsGoal> {
        let goal = SavingsGoal::new(name, target);
        goal.validate()?;

        self.storage.savings.upsert_goal(goal.clone())?;
        self.storage.savings.save()?;
        info!(id = %goal.id, name = %goal.name, "savings goal added");

        Ok(goal)
    }

    /// Delete a savings goal
    pub fn delete_goal(&self, id: GoalId) -> QuincenaResult<()> {
        if !self.storage.savings.delete_goal(id)? {
            return Err(QuincenaError::NotFound {
                entity_type: "Savings goal",
                identifier: id.to_string(),
            });
        }
        self.storage.savings.save()?;
        info!(%id, "savings goal deleted");
        Ok(())
    }

    /// All goals with progress against the running total
    pub fn goals(&self) -> QuincenaResult<Vec<GoalProgress>> {
        let total = self.storage.savings.total()?;
        Ok(self
            .storage
            .savings
            .all_goals()?
            .into_iter()
            .map(|goal| GoalProgress {
                fraction: goal.progress(total),
                saved: total,
                goal,
            })
            .collect())
    }
}
