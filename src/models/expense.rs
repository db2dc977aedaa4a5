//! Expense model
//!
//! An expense carries a non-empty set of category ids: the amount is
//! *attributed* to every category it is tagged with, not split between them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{CategoryId, ExpenseId};
use super::money::Money;
use crate::error::{QuincenaError, QuincenaResult};

/// Where the money for an expense comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FundingSource {
    /// Paid out of the period's salary (the default)
    #[default]
    Salary,
    /// Paid out of the savings pool
    Savings,
}

impl fmt::Display for FundingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Salary => write!(f, "salary"),
            Self::Savings => write!(f, "savings"),
        }
    }
}

impl FromStr for FundingSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "salary" => Ok(Self::Salary),
            "savings" => Ok(Self::Savings),
            other => Err(format!(
                "unknown funding source '{}' (expected 'salary' or 'savings')",
                other
            )),
        }
    }
}

/// A single expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// Amount spent (always positive)
    pub amount: Money,

    /// What the expense was for
    pub description: String,

    /// Date the expense occurred
    pub date: NaiveDate,

    /// Where the money came from
    #[serde(default)]
    pub funding: FundingSource,

    /// Categories this expense is attributed to (never empty)
    pub category_ids: Vec<CategoryId>,

    /// When the expense was recorded
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense
    pub fn new(
        amount: Money,
        description: impl Into<String>,
        date: NaiveDate,
        funding: FundingSource,
        category_ids: Vec<CategoryId>,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            amount,
            description: description.into(),
            date,
            funding,
            category_ids,
            created_at: Utc::now(),
        }
    }

    /// Validate the expense
    pub fn validate(&self) -> QuincenaResult<()> {
        if !self.amount.is_positive() {
            return Err(QuincenaError::validation("amount", "must be positive"));
        }
        if self.description.trim().is_empty() {
            return Err(QuincenaError::validation("description", "cannot be empty"));
        }
        if self.category_ids.is_empty() {
            return Err(QuincenaError::validation(
                "categories",
                "at least one category is required",
            ));
        }
        Ok(())
    }
}
