//! Loan model
//!
//! Money lent to another person. The deduction type records how the loan was
//! funded, which controls whether the dashboard deducts it from available
//! money (only `none` loans are deducted there; the other two kinds are
//! already reflected as an expense or a savings withdrawal).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::LoanId;
use super::money::Money;
use crate::error::{QuincenaError, QuincenaResult};

/// How a loan was funded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DeductionType {
    /// Not deducted anywhere else; the dashboard subtracts it
    #[default]
    None,
    /// A companion expense row was created at loan creation
    AsExpense,
    /// Withdrawn from the savings pool at loan creation
    FromSavings,
}

impl fmt::Display for DeductionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::AsExpense => write!(f, "as-expense"),
            Self::FromSavings => write!(f, "from-savings"),
        }
    }
}

impl FromStr for DeductionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "ninguno" => Ok(Self::None),
            "as-expense" | "gasto" => Ok(Self::AsExpense),
            "from-savings" | "ahorro" => Ok(Self::FromSavings),
            other => Err(format!(
                "unknown deduction type '{}' (expected 'none', 'as-expense', or 'from-savings')",
                other
            )),
        }
    }
}

/// A loan made to another person
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    /// Unique identifier
    pub id: LoanId,

    /// Who the money was lent to
    pub person: String,

    /// Amount lent (always positive)
    pub amount: Money,

    /// Free-form note
    #[serde(default)]
    pub description: String,

    /// Date the loan was made
    pub date: NaiveDate,

    /// Whether it has been repaid
    #[serde(default)]
    pub paid: bool,

    /// When it was repaid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<NaiveDate>,

    /// How the loan was funded
    #[serde(default)]
    pub deduction: DeductionType,

    /// When the loan was recorded
    pub created_at: DateTime<Utc>,
}

impl Loan {
    /// Create a new unpaid loan
    pub fn new(
        person: impl Into<String>,
        amount: Money,
        description: impl Into<String>,
        date: NaiveDate,
        deduction: DeductionType,
    ) -> Self {
        Self {
            id: LoanId::new(),
            person: person.into(),
            amount,
            description: description.into(),
            date,
            paid: false,
            paid_date: None,
            deduction,
            created_at: Utc::now(),
        }
    }

    /// Mark the loan as repaid on the given date
    pub fn mark_paid(&mut self, date: NaiveDate) {
        self.paid = true;
        self.paid_date = Some(date);
    }

    /// Mark the loan as unpaid again
    pub fn mark_unpaid(&mut self) {
        self.paid = false;
        self.paid_date = None;
    }

    /// Whether this loan should be deducted on the dashboard
    pub fn affects_budget(&self) -> bool {
        !self.paid && self.deduction == DeductionType::None
    }

    /// Validate the loan
    pub fn validate(&self) -> QuincenaResult<()> {
        if self.person.trim().is_empty() {
            return Err(QuincenaError::validation("person", "cannot be empty"));
        }
        if !self.amount.is_positive() {
            return Err(QuincenaError::validation("amount", "must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 10).unwrap()
    }

    #[test]
    fn test_new_loan() {
        let loan = Loan::new(
            "Maria",
            Money::from_cents(50000),
            "",
            sample_date(),
            DeductionType::None,
        );
        assert!(!loan.paid);
        assert!(loan.affects_budget());
        assert!(loan.validate().is_ok());
    }

    #[test]
    fn test_mark_paid() {
        let mut loan = Loan::new(
            "Maria",
            Money::from_cents(50000),
            "",
            sample_date(),
            DeductionType::None,
        );
        loan.mark_paid(sample_date());
        assert!(loan.paid);
        assert_eq!(loan.paid_date, Some(sample_date()));
        assert!(!loan.affects_budget());

        loan.mark_unpaid();
        assert!(loan.affects_budget());
    }

    #[test]
    fn test_deducted_loans_do_not_affect_budget() {
        for deduction in [DeductionType::AsExpense, DeductionType::FromSavings] {
            let loan = Loan::new(
                "Pedro",
                Money::from_cents(10000),
                "",
                sample_date(),
                deduction,
            );
            assert!(!loan.affects_budget());
        }
    }

    #[test]
    fn test_deduction_type_parse() {
        assert_eq!("none".parse::<DeductionType>().unwrap(), DeductionType::None);
        assert_eq!(
            "as-expense".parse::<DeductionType>().unwrap(),
            DeductionType::AsExpense
        );
        // Legacy Spanish forms
        assert_eq!(
            "ahorro".parse::<DeductionType>().unwrap(),
            DeductionType::FromSavings
        );
        assert!("other".parse::<DeductionType>().is_err());
    }

    #[test]
    fn test_validation() {
        let mut loan = Loan::new(
            "Maria",
            Money::from_cents(100),
            "",
            sample_date(),
            DeductionType::None,
        );
        loan.person = " ".to_string();
        assert!(loan.validate().unwrap_err().is_validation());

        loan.person = "Maria".to_string();
        loan.amount = Money::from_cents(-100);
        assert!(loan.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_serialization() {
        let loan = Loan::new(
            "Maria",
            Money::from_cents(50000),
            "almuerzo",
            sample_date(),
            DeductionType::FromSavings,
        );
        let json = serde_json::to_string(&loan).unwrap();
        assert!(json.contains("\"from-savings\""));
        let deserialized: Loan = serde_json::from_str(&json).unwrap();
        assert_eq!(loan.id, deserialized.id);
        assert_eq!(loan.deduction, deserialized.deduction);
    }
}
