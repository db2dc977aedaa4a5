//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to expenses.json, with date-range
//! queries used by the dashboard and reports.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::QuincenaError;
use crate::models::{CategoryId, Expense, ExpenseId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable expense data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ExpenseData {
    pub expenses: Vec<Expense>,
}

/// Repository for expense persistence
pub struct ExpenseRepository {
    path: PathBuf,
    expenses: RwLock<HashMap<ExpenseId, Expense>>,
}

impl ExpenseRepository {
    /// Create a new expense repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            expenses: RwLock::new(HashMap::new()),
        }
    }

    /// Load expenses from disk
    pub fn load(&self) -> Result<(), QuincenaError> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut expenses = self
            .expenses
            .write()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        expenses.clear();
        for expense in file_data.expenses {
            expenses.insert(expense.id, expense);
        }

        Ok(())
    }

    /// Save expenses to disk
    pub fn save(&self) -> Result<(), QuincenaError> {
        let expenses = self
            .expenses
            .read()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = expenses.values().cloned().collect();
        list.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));

        write_json_atomic(&self.path, &ExpenseData { expenses: list })
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, QuincenaError> {
        let expenses = self
            .expenses
            .read()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(expenses.get(&id).cloned())
    }

    /// Get all expenses, newest first
    pub fn get_all(&self) -> Result<Vec<Expense>, QuincenaError> {
        let expenses = self
            .expenses
            .read()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = expenses.values().cloned().collect();
        list.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(list)
    }

    /// Get expenses with a date inside [start, end], oldest first
    pub fn get_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Expense>, QuincenaError> {
        let expenses = self
            .expenses
            .read()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = expenses
            .values()
            .filter(|e| e.date >= start && e.date <= end)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
        Ok(list)
    }

    /// Check whether any expense references the given category
    pub fn uses_category(&self, id: CategoryId) -> Result<bool, QuincenaError> {
        let expenses = self
            .expenses
            .read()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(expenses.values().any(|e| e.category_ids.contains(&id)))
    }

    /// Insert or update an expense
    pub fn upsert(&self, expense: Expense) -> Result<(), QuincenaError> {
        let mut expenses = self
            .expenses
            .write()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        expenses.insert(expense.id, expense);
        Ok(())
    }

    /// Delete an expense
    pub fn delete(&self, id: ExpenseId) -> Result<bool, QuincenaError> {
        let mut expenses = self
            .expenses
            .write()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(expenses.remove(&id).is_some())
    }

    /// Count expenses
    pub fn count(&self) -> Result<usize, QuincenaError> {
        let expenses = self
            .expenses
            .read()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(expenses.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FundingSource, Money};
    use chrono::Datelike;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, ExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");
        let repo = ExpenseRepository::new(path);
        (temp_dir, repo)
    }

    fn sample_expense(day: u32) -> Expense {
        Expense::new(
            Money::from_cents(10000),
            "test",
            NaiveDate::from_ymd_opt(2024, 4, day).unwrap(),
            FundingSource::Salary,
            vec![CategoryId::new()],
        )
    }

    #[test]
    fn test_basic_operations() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let expense = sample_expense(10);
        let id = expense.id;

        repo.upsert(expense).unwrap();
        assert_eq!(repo.count().unwrap(), 1);
        assert!(repo.get(id).unwrap().is_some());

        repo.delete(id).unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_range_query() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        for day in [1, 10, 15, 16, 30] {
            repo.upsert(sample_expense(day)).unwrap();
        }

        let first_half = repo
            .get_in_range(
                NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 4, 15).unwrap(),
            )
            .unwrap();
        assert_eq!(first_half.len(), 3);
        // Oldest first
        assert_eq!(first_half[0].date.day(), 1);

        let second_half = repo
            .get_in_range(
                NaiveDate::from_ymd_opt(2024, 4, 16).unwrap(),
                NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
            )
            .unwrap();
        assert_eq!(second_half.len(), 2);
    }

    #[test]
    fn test_uses_category() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let expense = sample_expense(10);
        let cat_id = expense.category_ids[0];
        repo.upsert(expense).unwrap();

        assert!(repo.uses_category(cat_id).unwrap());
        assert!(!repo.uses_category(CategoryId::new()).unwrap());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let expense = sample_expense(10);
        let id = expense.id;
        repo.upsert(expense).unwrap();
        repo.save().unwrap();

        let repo2 = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        repo2.load().unwrap();
        assert!(repo2.get(id).unwrap().is_some());
    }
}
