//! Extra income model
//!
//! One-off income outside the base salary (bonuses, side work). Extra income
//! rows are dated and picked up by whichever period their date falls into.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::IncomeId;
use super::money::Money;
use crate::error::{QuincenaError, QuincenaResult};

/// A one-off extra income entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtraIncome {
    /// Unique identifier
    pub id: IncomeId,

    /// Amount received (always positive)
    pub amount: Money,

    /// Where the money came from
    pub description: String,

    /// Date the income was received
    pub date: NaiveDate,

    /// When the entry was recorded
    pub created_at: DateTime<Utc>,
}

impl ExtraIncome {
    /// Create a new extra income entry
    pub fn new(amount: Money, description: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: IncomeId::new(),
            amount,
            description: description.into(),
            date,
            created_at: Utc::now(),
        }
    }

    /// Validate the entry
    pub fn validate(&self) -> QuincenaResult<()> {
        if !self.amount.is_positive() {
            return Err(QuincenaError::validation("amount", "must be positive"));
        }
        if self.description.trim().is_empty() {
            return Err(QuincenaError::validation("description", "cannot be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 5).unwrap()
    }

    #[test]
    fn test_new_income() {
        let income = ExtraIncome::new(Money::from_cents(250000), "Freelance", sample_date());
        assert!(income.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let mut income = ExtraIncome::new(Money::zero(), "Freelance", sample_date());
        assert!(income.validate().unwrap_err().is_validation());

        income.amount = Money::from_cents(100);
        income.description = String::new();
        assert!(income.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_serialization() {
        let income = ExtraIncome::new(Money::from_cents(250000), "Freelance", sample_date());
        let json = serde_json::to_string(&income).unwrap();
        let deserialized: ExtraIncome = serde_json::from_str(&json).unwrap();
        assert_eq!(income.id, deserialized.id);
        assert_eq!(income.amount, deserialized.amount);
    }
}
