//! Display formatting for terminal output
//!
//! Plain-text renderers for the data models and the dashboard. Every
//! function returns a `String`; the CLI decides where it goes.

pub mod category;
pub mod dashboard;
pub mod expense;
pub mod fixed_payment;
pub mod loan;
pub mod savings;

pub use category::format_category_list;
pub use dashboard::format_dashboard;
pub use expense::{format_expense_list, format_expense_row};
pub use fixed_payment::format_fixed_payment_list;
pub use loan::format_loan_list;
pub use savings::{format_goal_list, format_savings_history};
