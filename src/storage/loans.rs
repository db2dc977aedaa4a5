//! Loan repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::QuincenaError;
use crate::models::{Loan, LoanId, Money};

use super::file_io::{read_json, write_json_atomic};

/// Serializable loan data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct LoanData {
    pub loans: Vec<Loan>,
}

/// Repository for loan persistence
pub struct LoanRepository {
    path: PathBuf,
    loans: RwLock<HashMap<LoanId, Loan>>,
}

impl LoanRepository {
    /// Create a new loan repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            loans: RwLock::new(HashMap::new()),
        }
    }

    /// Load loans from disk
    pub fn load(&self) -> Result<(), QuincenaError> {
        let file_data: LoanData = read_json(&self.path)?;

        let mut loans = self
            .loans
            .write()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        loans.clear();
        for loan in file_data.loans {
            loans.insert(loan.id, loan);
        }

        Ok(())
    }

    /// Save loans to disk
    pub fn save(&self) -> Result<(), QuincenaError> {
        let loans = self
            .loans
            .read()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = loans.values().cloned().collect();
        list.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));

        write_json_atomic(&self.path, &LoanData { loans: list })
    }

    /// Get a loan by ID
    pub fn get(&self, id: LoanId) -> Result<Option<Loan>, QuincenaError> {
        let loans = self
            .loans
            .read()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(loans.get(&id).cloned())
    }

    /// Get all loans, newest first
    pub fn get_all(&self) -> Result<Vec<Loan>, QuincenaError> {
        let loans = self
            .loans
            .read()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = loans.values().cloned().collect();
        list.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(list)
    }

    /// Get unpaid loans, newest first
    pub fn get_unpaid(&self) -> Result<Vec<Loan>, QuincenaError> {
        Ok(self.get_all()?.into_iter().filter(|l| !l.paid).collect())
    }

    /// Total of unpaid loans that deduct from the dashboard
    /// (deduction type `none`; the other kinds are already reflected elsewhere)
    pub fn total_affecting_budget(&self) -> Result<Money, QuincenaError> {
        let loans = self
            .loans
            .read()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(loans
            .values()
            .filter(|l| l.affects_budget())
            .map(|l| l.amount)
            .sum())
    }

    /// Insert or update a loan
    pub fn upsert(&self, loan: Loan) -> Result<(), QuincenaError> {
        let mut loans = self
            .loans
            .write()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        loans.insert(loan.id, loan);
        Ok(())
    }

    /// Delete a loan
    pub fn delete(&self, id: LoanId) -> Result<bool, QuincenaError> {
        let mut loans = self
            .loans
            .write()
            .map_err(|e| QuincenaError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(loans.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DeductionType;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, LoanRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("loans.json");
        let repo = LoanRepository::new(path);
        (temp_dir, repo)
    }

    fn sample_loan(amount: i64, deduction: DeductionType) -> Loan {
        Loan::new(
            "Maria",
            Money::from_cents(amount),
            "",
            NaiveDate::from_ymd_opt(2024, 4, 10).unwrap(),
            deduction,
        )
    }

    #[test]
    fn test_total_affecting_budget_filters_deduction_types() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.upsert(sample_loan(50000, DeductionType::None)).unwrap();
        repo.upsert(sample_loan(30000, DeductionType::FromSavings))
            .unwrap();
        repo.upsert(sample_loan(20000, DeductionType::AsExpense))
            .unwrap();

        // Only the `none` loan counts
        assert_eq!(repo.total_affecting_budget().unwrap().cents(), 50000);
    }

    #[test]
    fn test_paid_loans_excluded_from_total() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let mut loan = sample_loan(50000, DeductionType::None);
        loan.mark_paid(NaiveDate::from_ymd_opt(2024, 4, 20).unwrap());
        repo.upsert(loan).unwrap();

        assert_eq!(repo.total_affecting_budget().unwrap().cents(), 0);
        assert!(repo.get_unpaid().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let loan = sample_loan(50000, DeductionType::None);
        let id = loan.id;
        repo.upsert(loan).unwrap();
        repo.save().unwrap();

        let repo2 = LoanRepository::new(temp_dir.path().join("loans.json"));
        repo2.load().unwrap();
        assert_eq!(repo2.get(id).unwrap().unwrap().person, "Maria");
    }
}
