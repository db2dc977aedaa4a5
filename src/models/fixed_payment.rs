//! Fixed payment model
//!
//! Recurring obligations (rent, subscriptions) with a due day-of-month. The
//! period service projects them into concrete dates; deleting a fixed payment
//! only deactivates it so historical reports stay intact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{CategoryId, FixedPaymentId};
use super::money::Money;
use crate::error::{QuincenaError, QuincenaResult};

/// A recurring fixed payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedPayment {
    /// Unique identifier
    pub id: FixedPaymentId,

    /// Payment name (e.g. "Renta")
    pub name: String,

    /// Amount due each occurrence (always positive)
    pub amount: Money,

    /// Day of month the payment is due, 1-31 (clamped into short months)
    pub due_day: u32,

    /// Optional category for reporting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,

    /// Whether the payment is still active
    #[serde(default = "default_active")]
    pub active: bool,

    /// When the payment was created
    pub created_at: DateTime<Utc>,

    /// When the payment was last modified
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl FixedPayment {
    /// Create a new active fixed payment
    pub fn new(name: impl Into<String>, amount: Money, due_day: u32) -> Self {
        let now = Utc::now();
        Self {
            id: FixedPaymentId::new(),
            name: name.into(),
            amount,
            due_day,
            category_id: None,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Deactivate the payment ("delete" without losing history)
    pub fn deactivate(&mut self) {
        self.active = false;
        self.updated_at = Utc::now();
    }

    /// Validate the payment
    pub fn validate(&self) -> QuincenaResult<()> {
        if self.name.trim().is_empty() {
            return Err(QuincenaError::validation("name", "cannot be empty"));
        }
        if !self.amount.is_positive() {
            return Err(QuincenaError::validation("amount", "must be positive"));
        }
        if !(1..=31).contains(&self.due_day) {
            return Err(QuincenaError::validation(
                "due_day",
                format!("{} is out of range (1-31)", self.due_day),
            ));
        }
        Ok(())
    }
}
