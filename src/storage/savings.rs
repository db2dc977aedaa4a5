//! Savings repository for JSON storage
//!
//! One file holds the per-period deposit records, the running total, and the
//! savings goals. A single lock guards all three so deposit/withdraw updates
//! stay consistent.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::QuincenaError;
use crate::models::{GoalId, Money, Period, SavingsGoal, SavingsRecord};

use super::file_io::{read_json, write_json_atomic};

/// Serializable savings data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct SavingsData {
    pub records: Vec<SavingsRecord>,
    pub total: Money,
    pub goals: Vec<SavingsGoal>,
}

#[derive(Default)]
struct SavingsState {
    records: HashMap<Period, SavingsRecord>,
    total: Money,
    goals: HashMap<GoalId, SavingsGoal>,
}

/// Repository for savings persistence
pub struct SavingsRepository {
    path: PathBuf,
    state: RwLock<SavingsState>,
}

impl SavingsRepository {
    /// Create a new savings repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            state: RwLock::new(SavingsState::default()),
        }
    }

    /// Load savings data from disk
    pub fn load(&self) -> Result<(), QuincenaError> {
        let file_data: SavingsData = read_json(&self.path)?;

        let mut state = self
            .state
            .write()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        state.records.clear();
        for record in file_data.records {
            state.records.insert(record.period, record);
        }
        state.total = file_data.total;
        state.goals.clear();
        for goal in file_data.goals {
            state.goals.insert(goal.id, goal);
        }

        Ok(())
    }

    /// Save savings data to disk
    pub fn save(&self) -> Result<(), QuincenaError> {
        let state = self
            .state
            .read()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut records: Vec<_> = state.records.values().cloned().collect();
        records.sort_by_key(|r| r.period);

        let mut goals: Vec<_> = state.goals.values().cloned().collect();
        goals.sort_by(|a, b| a.name.cmp(&b.name));

        write_json_atomic(
            &self.path,
            &SavingsData {
                records,
                total: state.total,
                goals,
            },
        )
    }

    /// Current running total
    pub fn total(&self) -> Result<Money, QuincenaError> {
        let state = self
            .state
            .read()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(state.total)
    }

    /// Overwrite the running total
    pub fn set_total(&self, total: Money) -> Result<(), QuincenaError> {
        let mut state = self
            .state
            .write()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        state.total = total;
        Ok(())
    }

    /// Get the deposit record for a period
    pub fn record_for(&self, period: Period) -> Result<Option<SavingsRecord>, QuincenaError> {
        let state = self
            .state
            .read()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(state.records.get(&period).cloned())
    }

    /// All deposit records, oldest first
    pub fn all_records(&self) -> Result<Vec<SavingsRecord>, QuincenaError> {
        let state = self
            .state
            .read()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut records: Vec<_> = state.records.values().cloned().collect();
        records.sort_by_key(|r| r.period);
        Ok(records)
    }

    /// Insert or replace a period's deposit record and set the running total
    /// in one step (deposits touch both)
    pub fn put_record(&self, record: SavingsRecord, total: Money) -> Result<(), QuincenaError> {
        let mut state = self
            .state
            .write()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        state.records.insert(record.period, record);
        state.total = total;
        Ok(())
    }

    /// Get a goal by ID
    pub fn get_goal(&self, id: GoalId) -> Result<Option<SavingsGoal>, QuincenaError> {
        let state = self
            .state
            .read()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(state.goals.get(&id).cloned())
    }

    /// All goals, sorted by name
    pub fn all_goals(&self) -> Result<Vec<SavingsGoal>, QuincenaError> {
        let state = self
            .state
            .read()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut goals: Vec<_> = state.goals.values().cloned().collect();
        goals.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(goals)
    }

    /// Insert or update a goal
    pub fn upsert_goal(&self, goal: SavingsGoal) -> Result<(), QuincenaError> {
        let mut state = self
            .state
            .write()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        state.goals.insert(goal.id, goal);
        Ok(())
    }

    /// Delete a goal
    pub fn delete_goal(&self, id: GoalId) -> Result<bool, QuincenaError> {
        let mut state = self
            .state
            .write()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(state.goals.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, SavingsRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("savings.json");
        let repo = SavingsRepository::new(path);
        (temp_dir, repo)
    }

    #[test]
    fn test_record_replaces_per_period() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let period = Period::new(2024, 4, 1);
        repo.put_record(
            SavingsRecord::new(period, Money::from_cents(750000), Money::from_cents(750000)),
            Money::from_cents(750000),
        )
        .unwrap();

        repo.put_record(
            SavingsRecord::new(period, Money::from_cents(500000), Money::from_cents(1_250_000)),
            Money::from_cents(1_250_000),
        )
        .unwrap();

        // Same period key, so only one record survives
        assert_eq!(repo.all_records().unwrap().len(), 1);
        assert_eq!(
            repo.record_for(period).unwrap().unwrap().deposited.cents(),
            500000
        );
        assert_eq!(repo.total().unwrap().cents(), 1_250_000);
    }

    #[test]
    fn test_goal_operations() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let goal = SavingsGoal::new("Emergencia", Money::from_cents(1_000_000));
        let id = goal.id;
        repo.upsert_goal(goal).unwrap();

        assert_eq!(repo.all_goals().unwrap().len(), 1);
        assert!(repo.get_goal(id).unwrap().is_some());

        repo.delete_goal(id).unwrap();
        assert!(repo.all_goals().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let period = Period::new(2024, 4, 2);
        repo.put_record(
            SavingsRecord::new(period, Money::from_cents(750000), Money::from_cents(750000)),
            Money::from_cents(750000),
        )
        .unwrap();
        repo.upsert_goal(SavingsGoal::new("Viaje", Money::from_cents(500000)))
            .unwrap();
        repo.save().unwrap();

        let repo2 = SavingsRepository::new(temp_dir.path().join("savings.json"));
        repo2.load().unwrap();

        assert_eq!(repo2.total().unwrap().cents(), 750000);
        assert!(repo2.record_for(period).unwrap().is_some());
        assert_eq!(repo2.all_goals().unwrap().len(), 1);
    }
}
