//! Salary repository for JSON storage
//!
//! One base salary plus optional per-period overrides, keyed by the period's
//! "YYYY-MM-C" key form.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::QuincenaError;
use crate::models::{Money, Period};

use super::file_io::{read_json, write_json_atomic};

/// Serializable salary data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct SalaryData {
    pub base: Money,
    #[serde(default)]
    pub overrides: HashMap<String, Money>,
}

/// Repository for salary persistence
pub struct SalaryRepository {
    path: PathBuf,
    data: RwLock<SalaryData>,
}

impl SalaryRepository {
    /// Create a new salary repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(SalaryData::default()),
        }
    }

    /// Load salary data from disk
    pub fn load(&self) -> Result<(), QuincenaError> {
        let file_data: SalaryData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = file_data;
        Ok(())
    }

    /// Save salary data to disk
    pub fn save(&self) -> Result<(), QuincenaError> {
        let data = self
            .data
            .read()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        write_json_atomic(&self.path, &*data)
    }

    /// Get the base salary (zero when never set)
    pub fn base(&self) -> Result<Money, QuincenaError> {
        let data = self
            .data
            .read()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.base)
    }

    /// Set the base salary
    pub fn set_base(&self, amount: Money) -> Result<(), QuincenaError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        data.base = amount;
        Ok(())
    }

    /// Get the override for a period, if any
    pub fn override_for(&self, period: Period) -> Result<Option<Money>, QuincenaError> {
        let data = self
            .data
            .read()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.overrides.get(&period.key()).copied())
    }

    /// Set the override for a period
    pub fn set_override(&self, period: Period, amount: Money) -> Result<(), QuincenaError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        data.overrides.insert(period.key(), amount);
        Ok(())
    }

    /// Clear the override for a period
    pub fn clear_override(&self, period: Period) -> Result<bool, QuincenaError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        Ok(data.overrides.remove(&period.key()).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, SalaryRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("salary.json");
        let repo = SalaryRepository::new(path);
        (temp_dir, repo)
    }

    #[test]
    fn test_base_defaults_to_zero() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert!(repo.base().unwrap().is_zero());
    }

    #[test]
    fn test_override_lifecycle() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let period = Period::new(2024, 4, 1);
        repo.set_base(Money::from_cents(2_000_000)).unwrap();
        assert!(repo.override_for(period).unwrap().is_none());

        repo.set_override(period, Money::from_cents(2_500_000)).unwrap();
        assert_eq!(
            repo.override_for(period).unwrap().unwrap().cents(),
            2_500_000
        );

        assert!(repo.clear_override(period).unwrap());
        assert!(repo.override_for(period).unwrap().is_none());
        assert!(!repo.clear_override(period).unwrap());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.set_base(Money::from_cents(2_000_000)).unwrap();
        repo.set_override(Period::new(2024, 4, 2), Money::from_cents(2_200_000))
            .unwrap();
        repo.save().unwrap();

        let repo2 = SalaryRepository::new(temp_dir.path().join("salary.json"));
        repo2.load().unwrap();
        assert_eq!(repo2.base().unwrap().cents(), 2_000_000);
        assert_eq!(
            repo2
                .override_for(Period::new(2024, 4, 2))
                .unwrap()
                .unwrap()
                .cents(),
            2_200_000
        );
    }
}
