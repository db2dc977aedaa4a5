//! Export functionality
//!
//! CSV export of a period's expense rows.

mod csv;

pub use self::csv::{default_export_filename, export_period_csv};
