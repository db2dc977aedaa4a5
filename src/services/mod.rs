//! Business logic layer
//!
//! Services borrow the shared [`Storage`](crate::storage::Storage) and
//! implement the operations the CLI exposes: period resolution, the dashboard
//! snapshot, and CRUD with side effects for every entity.

pub mod category;
pub mod dashboard;
pub mod expense;
pub mod fixed_payment;
pub mod income;
pub mod loan;
pub mod period;
pub mod salary;
pub mod savings;

pub use category::CategoryService;
pub use dashboard::{CategorySpend, DashboardService, DashboardSnapshot, FeedEntry};
pub use expense::ExpenseService;
pub use fixed_payment::{FixedOccurrence, FixedPaymentService};
pub use income::IncomeService;
pub use loan::LoanService;
pub use period::PeriodService;
pub use salary::SalaryService;
pub use savings::{GoalProgress, SavingsService};
