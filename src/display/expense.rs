//! Expense display formatting

use std::collections::HashMap;

use crate::models::{CategoryId, Expense, FundingSource};

/// Format a single expense for display (register row)
pub fn format_expense_row(expense: &Expense, category_names: &HashMap<CategoryId, String>) -> String {
    let funding_icon = match expense.funding {
        FundingSource::Salary => " ",
        FundingSource::Savings => "◆",
    };

    let names: Vec<&str> = expense
        .category_ids
        .iter()
        .filter_map(|id| category_names.get(id).map(String::as_str))
        .collect();

    format!(
        "{} {} {:25} {:>14}  {}",
        funding_icon,
        expense.date.format("%Y-%m-%d"),
        truncate(&expense.description, 25),
        expense.amount.to_string(),
        names.join(", ")
    )
}

/// Format a list of expenses as a register
pub fn format_expense_list(
    expenses: &[Expense],
    category_names: &HashMap<CategoryId, String>,
) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "  {:10} {:25} {:>14}  {}\n",
        "Date", "Description", "Amount", "Categories"
    ));
    output.push_str(&"-".repeat(70));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format_expense_row(expense, category_names));
        output.push('\n');
    }
    output.push_str("\n◆ = paid from savings\n");

    output
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
