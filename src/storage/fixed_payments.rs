//! Fixed payment repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::QuincenaError;
use crate::models::{CategoryId, FixedPayment, FixedPaymentId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable fixed payment data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct FixedPaymentData {
    pub payments: Vec<FixedPayment>,
}

/// Repository for fixed payment persistence
pub struct FixedPaymentRepository {
    path: PathBuf,
    payments: RwLock<HashMap<FixedPaymentId, FixedPayment>>,
}

impl FixedPaymentRepository {
    /// Create a new fixed payment repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            payments: RwLock::new(HashMap::new()),
        }
    }

    /// Load payments from disk
    pub fn load(&self) -> Result<(), QuincenaError> {
        let file_data: FixedPaymentData = read_json(&self.path)?;

        let mut payments = self
            .payments
            .write()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        payments.clear();
        for payment in file_data.payments {
            payments.insert(payment.id, payment);
        }

        Ok(())
    }

    /// Save payments to disk
    pub fn save(&self) -> Result<(), QuincenaError> {
        let payments = self
            .payments
            .read()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = payments.values().cloned().collect();
        list.sort_by(|a, b| a.due_day.cmp(&b.due_day).then(a.name.cmp(&b.name)));

        write_json_atomic(&self.path, &FixedPaymentData { payments: list })
    }

    /// Get a payment by ID
    pub fn get(&self, id: FixedPaymentId) -> Result<Option<FixedPayment>, QuincenaError> {
        let payments = self
            .payments
            .read()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(payments.get(&id).cloned())
    }

    /// Get all payments (active and inactive), sorted by due day
    pub fn get_all(&self) -> Result<Vec<FixedPayment>, QuincenaError> {
        let payments = self
            .payments
            .read()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = payments.values().cloned().collect();
        list.sort_by(|a, b| a.due_day.cmp(&b.due_day).then(a.name.cmp(&b.name)));
        Ok(list)
    }

    /// Get active payments, sorted by due day
    pub fn get_active(&self) -> Result<Vec<FixedPayment>, QuincenaError> {
        Ok(self.get_all()?.into_iter().filter(|p| p.active).collect())
    }

    /// Check whether any active payment references the given category
    pub fn uses_category(&self, id: CategoryId) -> Result<bool, QuincenaError> {
        let payments = self
            .payments
            .read()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(payments
            .values()
            .any(|p| p.active && p.category_id == Some(id)))
    }

    /// Insert or update a payment
    pub fn upsert(&self, payment: FixedPayment) -> Result<(), QuincenaError> {
        let mut payments = self
            .payments
            .write()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        payments.insert(payment.id, payment);
        Ok(())
    }

    /// Delete a payment outright (services prefer deactivation)
    pub fn delete(&self, id: FixedPaymentId) -> Result<bool, QuincenaError> {
        let mut payments = self
            .payments
            .write()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(payments.remove(&id).is_some())
    }
}
