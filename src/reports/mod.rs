//! Report generation
//!
//! Flat, renderer-agnostic report structures built from the stored data.

mod period_report;

pub use period_report::PeriodReport;
