//! Period override repository for JSON storage
//!
//! Explicit `(year, month, cycle) -> (start, end)` date ranges that take
//! precedence over the computed period boundaries. Deleting an override
//! silently reverts the period to the standard computation.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::QuincenaError;
use crate::models::Period;

use super::file_io::{read_json, write_json_atomic};

/// One explicit period range
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PeriodOverride {
    pub period: Period,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Serializable override data structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PeriodOverrideData {
    pub overrides: Vec<PeriodOverride>,
}

/// Repository for period override persistence
pub struct PeriodOverrideRepository {
    path: PathBuf,
    overrides: RwLock<HashMap<Period, PeriodOverride>>,
}

impl PeriodOverrideRepository {
    /// Create a new period override repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            overrides: RwLock::new(HashMap::new()),
        }
    }

    /// Load overrides from disk
    pub fn load(&self) -> Result<(), QuincenaError> {
        let file_data: PeriodOverrideData = read_json(&self.path)?;

        let mut overrides = self
            .overrides
            .write()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        overrides.clear();
        for ov in file_data.overrides {
            overrides.insert(ov.period, ov);
        }

        Ok(())
    }

    /// Save overrides to disk
    pub fn save(&self) -> Result<(), QuincenaError> {
        let overrides = self
            .overrides
            .read()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = overrides.values().copied().collect();
        list.sort_by_key(|o| o.period);

        write_json_atomic(&self.path, &PeriodOverrideData { overrides: list })
    }

    /// Get the override for a period, if any
    pub fn get(&self, period: Period) -> Result<Option<PeriodOverride>, QuincenaError> {
        let overrides = self
            .overrides
            .read()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(overrides.get(&period).copied())
    }

    /// Get all overrides, in period order
    pub fn get_all(&self) -> Result<Vec<PeriodOverride>, QuincenaError> {
        let overrides = self
            .overrides
            .read()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = overrides.values().copied().collect();
        list.sort_by_key(|o| o.period);
        Ok(list)
    }

    /// Set (insert or replace) the override for a period
    pub fn set(&self, period: Period, start: NaiveDate, end: NaiveDate) -> Result<(), QuincenaError> {
        if end < start {
            return Err(QuincenaError::validation(
                "range",
                format!("end {} is before start {}", end, start),
            ));
        }

        let mut overrides = self
            .overrides
            .write()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        overrides.insert(period, PeriodOverride { period, start, end });
        Ok(())
    }

    /// Delete the override for a period, reverting to the computed range
    pub fn delete(&self, period: Period) -> Result<bool, QuincenaError> {
        let mut overrides = self
            .overrides
            .write()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(overrides.remove(&period).is_some())
    }
}
