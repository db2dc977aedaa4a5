//! Ledger settings repository for JSON storage
//!
//! String key-value pairs that drive period resolution: the period mode and
//! the pay days. Values are clamped into range on read; equal quincenal pay
//! days are rejected when written, never silently fixed later.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::QuincenaError;
use crate::models::PeriodMode;

use super::file_io::{read_json, write_json_atomic};

const KEY_PERIOD_MODE: &str = "period_mode";
const KEY_QUINCENAL_DAY_1: &str = "quincenal_pay_day_1";
const KEY_QUINCENAL_DAY_2: &str = "quincenal_pay_day_2";
const KEY_MONTHLY_PAY_DAY: &str = "monthly_pay_day";

pub const DEFAULT_QUINCENAL_DAY_1: u32 = 1;
pub const DEFAULT_QUINCENAL_DAY_2: u32 = 16;
pub const DEFAULT_MONTHLY_PAY_DAY: u32 = 1;

/// Repository for ledger settings persistence
pub struct LedgerSettingsRepository {
    path: PathBuf,
    values: RwLock<HashMap<String, String>>,
}

impl LedgerSettingsRepository {
    /// Create a new ledger settings repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            values: RwLock::new(HashMap::new()),
        }
    }

    /// Load settings from disk
    pub fn load(&self) -> Result<(), QuincenaError> {
        let file_data: HashMap<String, String> = read_json(&self.path)?;

        let mut values = self
            .values
            .write()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *values = file_data;
        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), QuincenaError> {
        let values = self
            .values
            .read()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        write_json_atomic(&self.path, &*values)
    }

    /// Get a raw setting value
    pub fn get(&self, key: &str) -> Result<Option<String>, QuincenaError> {
        let values = self
            .values
            .read()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(values.get(key).cloned())
    }

    /// Set a raw setting value
    pub fn set(&self, key: &str, value: impl Into<String>) -> Result<(), QuincenaError> {
        let mut values = self
            .values
            .write()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        values.insert(key.to_string(), value.into());
        Ok(())
    }

    /// Read an integer setting, clamped into [1, 31]
    fn get_day(&self, key: &str, default: u32) -> Result<u32, QuincenaError> {
        let raw = self.get(key)?;
        let value = raw
            .and_then(|s| s.trim().parse::<i64>().ok())
            .unwrap_or(default as i64);
        Ok(value.clamp(1, 31) as u32)
    }

    /// The configured period mode (quincenal when unset or unparseable)
    pub fn period_mode(&self) -> Result<PeriodMode, QuincenaError> {
        Ok(self
            .get(KEY_PERIOD_MODE)?
            .and_then(|s| s.parse().ok())
            .unwrap_or_default())
    }

    /// Set the period mode
    pub fn set_period_mode(&self, mode: PeriodMode) -> Result<(), QuincenaError> {
        self.set(KEY_PERIOD_MODE, mode.as_str())
    }

    /// First quincenal pay day, clamped into [1, 31]
    pub fn quincenal_pay_day_1(&self) -> Result<u32, QuincenaError> {
        self.get_day(KEY_QUINCENAL_DAY_1, DEFAULT_QUINCENAL_DAY_1)
    }

    /// Second quincenal pay day, clamped into [1, 31]
    pub fn quincenal_pay_day_2(&self) -> Result<u32, QuincenaError> {
        self.get_day(KEY_QUINCENAL_DAY_2, DEFAULT_QUINCENAL_DAY_2)
    }

    /// Set both quincenal pay days; equal days are rejected
    pub fn set_quincenal_pay_days(&self, day1: u32, day2: u32) -> Result<(), QuincenaError> {
        if !(1..=31).contains(&day1) || !(1..=31).contains(&day2) {
            return Err(QuincenaError::validation(
                "pay_day",
                "pay days must be between 1 and 31",
            ));
        }
        if day1 == day2 {
            return Err(QuincenaError::validation(
                "pay_day",
                "the two quincenal pay days must differ",
            ));
        }
        self.set(KEY_QUINCENAL_DAY_1, day1.to_string())?;
        self.set(KEY_QUINCENAL_DAY_2, day2.to_string())
    }

    /// Monthly pay day, clamped into [1, 31]
    pub fn monthly_pay_day(&self) -> Result<u32, QuincenaError> {
        self.get_day(KEY_MONTHLY_PAY_DAY, DEFAULT_MONTHLY_PAY_DAY)
    }

    /// Set the monthly pay day
    pub fn set_monthly_pay_day(&self, day: u32) -> Result<(), QuincenaError> {
        if !(1..=31).contains(&day) {
            return Err(QuincenaError::validation(
                "pay_day",
                "pay day must be between 1 and 31",
            ));
        }
        self.set(KEY_MONTHLY_PAY_DAY, day.to_string())
    }
}
