//! Extra income repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::QuincenaError;
use crate::models::{ExtraIncome, IncomeId, Money};

use super::file_io::{read_json, write_json_atomic};

/// Serializable income data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct IncomeData {
    pub entries: Vec<ExtraIncome>,
}

/// Repository for extra income persistence
pub struct IncomeRepository {
    path: PathBuf,
    entries: RwLock<HashMap<IncomeId, ExtraIncome>>,
}

impl IncomeRepository {
    /// Create a new income repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Load entries from disk
    pub fn load(&self) -> Result<(), QuincenaError> {
        let file_data: IncomeData = read_json(&self.path)?;

        let mut entries = self
            .entries
            .write()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        entries.clear();
        for entry in file_data.entries {
            entries.insert(entry.id, entry);
        }

        Ok(())
    }

    /// Save entries to disk
    pub fn save(&self) -> Result<(), QuincenaError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = entries.values().cloned().collect();
        list.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));

        write_json_atomic(&self.path, &IncomeData { entries: list })
    }

    /// Get an entry by ID
    pub fn get(&self, id: IncomeId) -> Result<Option<ExtraIncome>, QuincenaError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(entries.get(&id).cloned())
    }

    /// Get all entries, newest first
    pub fn get_all(&self) -> Result<Vec<ExtraIncome>, QuincenaError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = entries.values().cloned().collect();
        list.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(list)
    }

    /// Total of entries with a date inside [start, end]
    pub fn total_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Money, QuincenaError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(entries
            .values()
            .filter(|i| i.date >= start && i.date <= end)
            .map(|i| i.amount)
            .sum())
    }

    /// Insert or update an entry
    pub fn upsert(&self, entry: ExtraIncome) -> Result<(), QuincenaError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        entries.insert(entry.id, entry);
        Ok(())
    }

    /// Delete an entry
    pub fn delete(&self, id: IncomeId) -> Result<bool, QuincenaError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(entries.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, IncomeRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("income.json");
        let repo = IncomeRepository::new(path);
        (temp_dir, repo)
    }

    fn sample_income(day: u32, amount: i64) -> ExtraIncome {
        ExtraIncome::new(
            Money::from_cents(amount),
            "Freelance",
            NaiveDate::from_ymd_opt(2024, 4, day).unwrap(),
        )
    }

    #[test]
    fn test_total_in_range() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.upsert(sample_income(5, 10000)).unwrap();
        repo.upsert(sample_income(14, 20000)).unwrap();
        repo.upsert(sample_income(20, 40000)).unwrap();

        let total = repo
            .total_in_range(
                NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 4, 15).unwrap(),
            )
            .unwrap();
        assert_eq!(total.cents(), 30000);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let entry = sample_income(5, 10000);
        let id = entry.id;
        repo.upsert(entry).unwrap();
        repo.save().unwrap();

        let repo2 = IncomeRepository::new(temp_dir.path().join("income.json"));
        repo2.load().unwrap();
        assert_eq!(repo2.get(id).unwrap().unwrap().amount.cents(), 10000);
    }
}
