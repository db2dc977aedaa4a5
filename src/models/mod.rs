//! Core data models for Quincena
//!
//! This module contains all the data structures that represent the budgeting
//! domain: pay periods, expenses, fixed payments, loans, income, and savings.

pub mod category;
pub mod expense;
pub mod fixed_payment;
pub mod ids;
pub mod income;
pub mod loan;
pub mod money;
pub mod period;
pub mod savings;

pub use category::{Category, DefaultCategory};
pub use expense::{Expense, FundingSource};
pub use fixed_payment::FixedPayment;
pub use ids::{CategoryId, ExpenseId, FixedPaymentId, GoalId, IncomeId, LoanId};
pub use income::ExtraIncome;
pub use loan::{DeductionType, Loan};
pub use money::Money;
pub use period::{Period, PeriodMode};
pub use savings::{SavingsGoal, SavingsRecord};
