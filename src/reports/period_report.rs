//! Period Report
//!
//! A flat snapshot of one period: the resolved date range, the raw expense,
//! fixed payment, and loan rows behind the dashboard numbers, and the
//! dashboard totals themselves. Renderers (terminal, CSV) consume this
//! without touching the store again.

use chrono::NaiveDate;

use crate::error::QuincenaResult;
use crate::models::{Expense, Loan, Period, PeriodMode};
use crate::services::{DashboardService, DashboardSnapshot, FixedOccurrence, FixedPaymentService};
use crate::storage::Storage;

/// Everything there is to say about one period
#[derive(Debug, Clone)]
pub struct PeriodReport {
    /// The period being reported
    pub period: Period,
    /// Human label, e.g. "1ª Quincena - Abril 2024"
    pub label: String,
    /// Resolved start date (inclusive)
    pub start: NaiveDate,
    /// Resolved end date (inclusive)
    pub end: NaiveDate,
    /// Expense rows in the range, oldest first
    pub expenses: Vec<Expense>,
    /// Fixed payment occurrences projected into the range
    pub fixed: Vec<FixedOccurrence>,
    /// Outstanding loans that deduct from available money
    pub loans: Vec<Loan>,
    /// The aggregated dashboard numbers
    pub totals: DashboardSnapshot,
}

impl PeriodReport {
    /// Generate a report for a period, as seen from `today`
    pub fn generate(storage: &Storage, period: Period, today: NaiveDate) -> QuincenaResult<Self> {
        let totals = DashboardService::new(storage).snapshot(period, today)?;
        let expenses = storage.expenses.get_in_range(totals.start, totals.end)?;
        let fixed =
            FixedPaymentService::new(storage).occurrences_in_range(totals.start, totals.end)?;
        let loans = storage
            .loans
            .get_unpaid()?
            .into_iter()
            .filter(|l| l.affects_budget())
            .collect();

        Ok(Self {
            period,
            label: period.label(totals.mode),
            start: totals.start,
            end: totals.end,
            expenses,
            fixed,
            loans,
            totals,
        })
    }

    /// The mode the report was resolved under
    pub fn mode(&self) -> PeriodMode {
        self.totals.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::QuincenaPaths;
    use crate::models::{Category, DeductionType, FundingSource, Money};
    use crate::services::{ExpenseService, LoanService, SalaryService};
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = QuincenaPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_report_collects_rows_and_totals() {
        let (_tmp, storage) = setup();

        let category = Category::new("Comida");
        let cat_id = category.id;
        storage.categories.upsert(category).unwrap();

        SalaryService::new(&storage)
            .set_base(Money::from_cents(2_000_000))
            .unwrap();
        ExpenseService::new(&storage)
            .add(
                Money::from_cents(300_000),
                "Supermercado",
                date(2024, 4, 10),
                FundingSource::Salary,
                vec![cat_id],
            )
            .unwrap();
        LoanService::new(&storage)
            .add(
                "Maria",
                Money::from_cents(50_000),
                "",
                date(2024, 4, 8),
                DeductionType::None,
            )
            .unwrap();

        let report =
            PeriodReport::generate(&storage, Period::new(2024, 4, 1), date(2024, 4, 12)).unwrap();

        assert_eq!(report.label, "1ª Quincena - Abril 2024");
        assert_eq!(report.start, date(2024, 4, 1));
        assert_eq!(report.end, date(2024, 4, 15));
        assert_eq!(report.expenses.len(), 1);
        assert_eq!(report.loans.len(), 1);
        assert_eq!(report.totals.available_money.cents(), 1_650_000);
    }

    #[test]
    fn test_report_excludes_paid_loans() {
        let (_tmp, storage) = setup();

        let loans = LoanService::new(&storage);
        let loan = loans
            .add(
                "Pedro",
                Money::from_cents(50_000),
                "",
                date(2024, 4, 8),
                DeductionType::None,
            )
            .unwrap();
        loans.mark_paid(loan.id, date(2024, 4, 9)).unwrap();

        let report =
            PeriodReport::generate(&storage, Period::new(2024, 4, 1), date(2024, 4, 12)).unwrap();
        assert!(report.loans.is_empty());
    }
}
