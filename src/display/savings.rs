//! Savings display formatting

use crate::models::{PeriodMode, SavingsRecord};
use crate::services::GoalProgress;

/// Format the deposit history, oldest first
pub fn format_savings_history(records: &[SavingsRecord], mode: PeriodMode) -> String {
    if records.is_empty() {
        return "No savings recorded yet.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:28} {:>14} {:>14}\n",
        "Period", "Deposited", "Total after"
    ));
    output.push_str(&"-".repeat(60));
    output.push('\n');

    for record in records {
        output.push_str(&format!(
            "{:28} {:>14} {:>14}\n",
            record.period.label(mode),
            record.deposited.to_string(),
            record.total_after.to_string()
        ));
    }

    output
}

/// Format savings goals with a progress bar each
pub fn format_goal_list(goals: &[GoalProgress]) -> String {
    if goals.is_empty() {
        return "No savings goals set.\n".to_string();
    }

    let mut output = String::new();
    for progress in goals {
        let filled = (progress.fraction * 20.0).round() as usize;
        let bar: String = "█".repeat(filled) + &"░".repeat(20 - filled.min(20));
        output.push_str(&format!(
            "{:20} [{}] {:>5.1}%  {} / {}\n",
            progress.goal.name,
            bar,
            progress.fraction * 100.0,
            progress.saved,
            progress.goal.target
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Period, SavingsGoal};

    #[test]
    fn test_history_uses_period_labels() {
        let record = SavingsRecord::new(
            Period::new(2024, 4, 1),
            Money::from_cents(750000),
            Money::from_cents(750000),
        );

        let output = format_savings_history(&[record], PeriodMode::Quincenal);
        assert!(output.contains("1ª Quincena - Abril 2024"));
        assert!(output.contains("RD$7,500.00"));
    }

    #[test]
    fn test_goal_bar_half_full() {
        let goal = SavingsGoal::new("Emergencia", Money::from_cents(100000));
        let progress = GoalProgress {
            fraction: goal.progress(Money::from_cents(50000)),
            saved: Money::from_cents(50000),
            goal,
        };

        let output = format_goal_list(&[progress]);
        assert!(output.contains("50.0%"));
        assert!(output.contains("██████████░░░░░░░░░░"));
    }
}
