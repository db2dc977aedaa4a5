//! Loan display formatting

use crate::models::{DeductionType, Loan};

/// Format the loan list for display
pub fn format_loan_list(loans: &[Loan]) -> String {
    if loans.is_empty() {
        return "No loans found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:3} {:10} {:20} {:>14} {:12}\n",
        "", "Date", "Person", "Amount", "Deduction"
    ));
    output.push_str(&"-".repeat(65));
    output.push('\n');

    for loan in loans {
        let status = if loan.paid { "✓" } else { " " };
        let deduction = match loan.deduction {
            DeductionType::None => "-",
            DeductionType::AsExpense => "as expense",
            DeductionType::FromSavings => "from savings",
        };
        output.push_str(&format!(
            "{:3} {:10} {:20} {:>14} {:12}  {}\n",
            status,
            loan.date.format("%Y-%m-%d"),
            loan.person,
            loan.amount.to_string(),
            deduction,
            loan.id
        ));
    }

    output
}
