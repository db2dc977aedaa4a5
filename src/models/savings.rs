//! Savings models
//!
//! A `SavingsRecord` captures one period's deposit plus the running total
//! right after it; a repeat deposit in the same period replaces the recorded
//! deposit. `SavingsGoal` tracks a named target measured against the running
//! total.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::GoalId;
use super::money::Money;
use super::period::Period;
use crate::error::{QuincenaError, QuincenaResult};

/// One period's savings deposit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsRecord {
    /// The period the deposit belongs to
    pub period: Period,

    /// Amount deposited for this period
    pub deposited: Money,

    /// Running total immediately after this record was last written
    pub total_after: Money,

    /// When the record was last written
    pub recorded_at: DateTime<Utc>,
}

impl SavingsRecord {
    /// Create a record for a period
    pub fn new(period: Period, deposited: Money, total_after: Money) -> Self {
        Self {
            period,
            deposited,
            total_after,
            recorded_at: Utc::now(),
        }
    }
}

/// A named savings goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsGoal {
    /// Unique identifier
    pub id: GoalId,

    /// Goal name (e.g. "Fondo de emergencia")
    pub name: String,

    /// Target amount (always positive)
    pub target: Money,

    /// When the goal was created
    pub created_at: DateTime<Utc>,
}

impl SavingsGoal {
    /// Create a new goal
    pub fn new(name: impl Into<String>, target: Money) -> Self {
        Self {
            id: GoalId::new(),
            name: name.into(),
            target,
            created_at: Utc::now(),
        }
    }

    /// Progress toward the goal given the current running total, 0.0-1.0
    pub fn progress(&self, total: Money) -> f64 {
        if !self.target.is_positive() {
            return 0.0;
        }
        (total.cents() as f64 / self.target.cents() as f64).clamp(0.0, 1.0)
    }

    /// Validate the goal
    pub fn validate(&self) -> QuincenaResult<()> {
        if self.name.trim().is_empty() {
            return Err(QuincenaError::validation("name", "cannot be empty"));
        }
        if !self.target.is_positive() {
            return Err(QuincenaError::validation("target", "must be positive"));
        }
        Ok(())
    }
}
