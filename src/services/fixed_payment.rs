//! Fixed payment service
//!
//! CRUD for recurring payments plus the projection of due days into a
//! concrete date range (at most one occurrence per payment per period).

use chrono::{Datelike, NaiveDate};
use tracing::info;

use crate::error::{QuincenaError, QuincenaResult};
use crate::models::{CategoryId, FixedPayment, FixedPaymentId, Money};
use crate::storage::Storage;

use super::period::{clamp_day, next_month};

/// A fixed payment projected onto a concrete due date
#[derive(Debug, Clone)]
pub struct FixedOccurrence {
    pub payment: FixedPayment,
    pub due: NaiveDate,
}

/// Service for fixed payment management
pub struct FixedPaymentService<'a> {
    storage: &'a Storage,
}

impl<'a> FixedPaymentService<'a> {
    /// Create a new fixed payment service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a new fixed payment
    pub fn add(
        &self,
        name: impl Into<String>,
        amount: Money,
        due_day: u32,
        category_id: Option<CategoryId>,
    ) -> QuincenaResult<FixedPayment> {
        if let Some(id) = category_id {
            self.storage
                .categories
                .get(id)?
                .ok_or_else(|| QuincenaError::category_not_found(id.to_string()))?;
        }

        let mut payment = FixedPayment::new(name, amount, due_day);
        payment.category_id = category_id;
        payment.validate()?;

        self.storage.fixed_payments.upsert(payment.clone())?;
        self.storage.fixed_payments.save()?;
        info!(id = %payment.id, name = %payment.name, due_day, "fixed payment added");

        Ok(payment)
    }

    /// Update an existing fixed payment
    pub fn update(
        &self,
        id: FixedPaymentId,
        name: Option<String>,
        amount: Option<Money>,
        due_day: Option<u32>,
        category_id: Option<Option<CategoryId>>,
    ) -> QuincenaResult<FixedPayment> {
        let mut payment = self
            .storage
            .fixed_payments
            .get(id)?
            .ok_or_else(|| QuincenaError::fixed_payment_not_found(id.to_string()))?;

        if let Some(name) = name {
            payment.name = name;
        }
        if let Some(amount) = amount {
            payment.amount = amount;
        }
        if let Some(due_day) = due_day {
            payment.due_day = due_day;
        }
        if let Some(category_id) = category_id {
            if let Some(cat) = category_id {
                self.storage
                    .categories
                    .get(cat)?
                    .ok_or_else(|| QuincenaError::category_not_found(cat.to_string()))?;
            }
            payment.category_id = category_id;
        }
        payment.updated_at = chrono::Utc::now();
        payment.validate()?;

        self.storage.fixed_payments.upsert(payment.clone())?;
        self.storage.fixed_payments.save()?;
        info!(id = %payment.id, "fixed payment updated");

        Ok(payment)
    }

    /// Deactivate a fixed payment (history is kept)
    pub fn deactivate(&self, id: FixedPaymentId) -> QuincenaResult<FixedPayment> {
        let mut payment = self
            .storage
            .fixed_payments
            .get(id)?
            .ok_or_else(|| QuincenaError::fixed_payment_not_found(id.to_string()))?;

        payment.deactivate();
        self.storage.fixed_payments.upsert(payment.clone())?;
        self.storage.fixed_payments.save()?;
        info!(id = %payment.id, name = %payment.name, "fixed payment deactivated");

        Ok(payment)
    }

    /// Get a fixed payment by id
    pub fn get(&self, id: FixedPaymentId) -> QuincenaResult<FixedPayment> {
        self.storage
            .fixed_payments
            .get(id)?
            .ok_or_else(|| QuincenaError::fixed_payment_not_found(id.to_string()))
    }

    /// List fixed payments, sorted by due day
    pub fn list(&self, include_inactive: bool) -> QuincenaResult<Vec<FixedPayment>> {
        if include_inactive {
            self.storage.fixed_payments.get_all()
        } else {
            self.storage.fixed_payments.get_active()
        }
    }

    /// Project active payments into [start, end]
    ///
    /// Walks every calendar month the range touches, clamps the due day into
    /// that month, and keeps the first projected date inside the range, so
    /// each payment occurs at most once. Sorted by due date.
    pub fn occurrences_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> QuincenaResult<Vec<FixedOccurrence>> {
        let active = self.storage.fixed_payments.get_active()?;

        let mut occurrences = Vec::new();
        for payment in active {
            let mut year = start.year();
            let mut month = start.month();
            loop {
                let candidate = clamp_day(year, month, payment.due_day);
                if candidate > end {
                    break;
                }
                if candidate >= start {
                    occurrences.push(FixedOccurrence {
                        payment: payment.clone(),
                        due: candidate,
                    });
                    break;
                }
                let (ny, nm) = next_month(year, month);
                year = ny;
                month = nm;
                // The range is bounded, so stop once we walk past its end month
                if NaiveDate::from_ymd_opt(year, month, 1).map_or(true, |d| d > end) {
                    break;
                }
            }
        }

        occurrences.sort_by(|a, b| a.due.cmp(&b.due).then(a.payment.name.cmp(&b.payment.name)));
        Ok(occurrences)
    }

    /// Total amount of the occurrences in [start, end]
    pub fn total_in_range(&self, start: NaiveDate, end: NaiveDate) -> QuincenaResult<Money> {
        Ok(self
            .occurrences_in_range(start, end)?
            .iter()
            .map(|o| o.payment.amount)
            .sum())
    }
}
