//! Dashboard display formatting
//!
//! Renders the full snapshot: the headline money numbers, category
//! breakdown, and the recent activity feed.

use crate::services::{DashboardSnapshot, FeedEntry};

/// Format the dashboard snapshot for the terminal
pub fn format_dashboard(snapshot: &DashboardSnapshot) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", snapshot.period.label(snapshot.mode)));
    output.push_str(&format!(
        "{} - {}\n",
        snapshot.start.format("%Y-%m-%d"),
        snapshot.end.format("%Y-%m-%d")
    ));
    output.push_str(&"=".repeat(50));
    output.push('\n');

    output.push_str(&format!("{:24} {:>16}\n", "Salary", snapshot.salary.to_string()));
    if !snapshot.extra_income.is_zero() {
        output.push_str(&format!(
            "{:24} {:>16}\n",
            "Extra income",
            snapshot.extra_income.to_string()
        ));
    }
    output.push_str(&format!(
        "{:24} {:>16}\n",
        "Saved this period",
        snapshot.period_savings.to_string()
    ));
    output.push_str(&format!(
        "{:24} {:>16}\n",
        "Starting money",
        snapshot.starting_money.to_string()
    ));
    output.push('\n');

    output.push_str(&format!(
        "{:24} {:>16}\n",
        "Expenses",
        snapshot.total_expenses.to_string()
    ));
    if !snapshot.savings_funded.is_zero() {
        output.push_str(&format!(
            "{:24} {:>16}\n",
            "  of which from savings",
            snapshot.savings_funded.to_string()
        ));
    }
    output.push_str(&format!(
        "{:24} {:>16}\n",
        "Fixed payments",
        snapshot.total_fixed.to_string()
    ));
    output.push_str(&format!(
        "{:24} {:>16}\n",
        "Loans outstanding",
        snapshot.total_loans.to_string()
    ));
    output.push('\n');

    output.push_str(&format!(
        "{:24} {:>16}\n",
        "AVAILABLE",
        snapshot.available_money.to_string()
    ));
    output.push_str(&format!(
        "{:24} {:>16}\n",
        "Total savings",
        snapshot.total_savings.to_string()
    ));
    if !snapshot.average_daily_spend.is_zero() {
        output.push_str(&format!(
            "{:24} {:>16}\n",
            "Avg daily spend",
            snapshot.average_daily_spend.to_string()
        ));
    }

    if !snapshot.categories.is_empty() {
        output.push('\n');
        output.push_str("By category:\n");
        for spend in &snapshot.categories {
            output.push_str(&format!(
                "  {:22} {:>16}  ({})\n",
                spend.category.name,
                spend.total.to_string(),
                spend.count
            ));
        }
    }

    if !snapshot.recent.is_empty() {
        output.push('\n');
        output.push_str("Recent activity:\n");
        for entry in &snapshot.recent {
            match entry {
                FeedEntry::Expense(expense) => {
                    output.push_str(&format!(
                        "  {} {:25} {:>14}\n",
                        expense.date.format("%Y-%m-%d"),
                        expense.description,
                        expense.amount.to_string()
                    ));
                }
                FeedEntry::Fixed(occurrence) => {
                    output.push_str(&format!(
                        "  {} {:25} {:>14}  (fixed)\n",
                        occurrence.due.format("%Y-%m-%d"),
                        occurrence.payment.name,
                        occurrence.payment.amount.to_string()
                    ));
                }
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::QuincenaPaths;
    use crate::models::{Money, Period};
    use crate::services::{DashboardService, SalaryService, SavingsService};
    use crate::storage::Storage;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_dashboard_render() {
        let temp_dir = TempDir::new().unwrap();
        let paths = QuincenaPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        SalaryService::new(&storage)
            .set_base(Money::from_cents(2_000_000))
            .unwrap();
        SavingsService::new(&storage)
            .deposit(Period::new(2024, 4, 1), Money::from_cents(750_000))
            .unwrap();

        let snapshot = DashboardService::new(&storage)
            .snapshot(
                Period::new(2024, 4, 1),
                NaiveDate::from_ymd_opt(2024, 4, 12).unwrap(),
            )
            .unwrap();

        let output = format_dashboard(&snapshot);
        assert!(output.contains("1ª Quincena - Abril 2024"));
        assert!(output.contains("2024-04-01 - 2024-04-15"));
        assert!(output.contains("RD$20,000.00"));
        assert!(output.contains("AVAILABLE"));
        assert!(output.contains("RD$12,500.00"));
    }
}
