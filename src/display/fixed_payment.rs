//! Fixed payment display formatting

use crate::models::FixedPayment;

/// Format the fixed payment list, sorted as given
pub fn format_fixed_payment_list(payments: &[FixedPayment]) -> String {
    if payments.is_empty() {
        return "No fixed payments found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:3} {:25} {:>7} {:>14}\n",
        "", "Name", "Day", "Amount"
    ));
    output.push_str(&"-".repeat(55));
    output.push('\n');

    let mut total = crate::models::Money::zero();
    for payment in payments {
        let status = if payment.active { " " } else { "✗" };
        output.push_str(&format!(
            "{:3} {:25} {:>7} {:>14}\n",
            status,
            payment.name,
            payment.due_day,
            payment.amount.to_string()
        ));
        if payment.active {
            total += payment.amount;
        }
    }

    output.push_str(&format!("\nActive monthly total: {}\n", total));
    output
}
