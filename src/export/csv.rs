//! CSV export
//!
//! Writes a period's expense rows as CSV: date, description, category names,
//! amount. The default filename encodes the period
//! (`gastos_2024_04_Q1.csv`).

use std::collections::HashMap;
use std::io::Write;

use crate::error::{QuincenaError, QuincenaResult};
use crate::models::{Period, PeriodMode};
use crate::reports::PeriodReport;
use crate::storage::Storage;

/// The conventional filename for a period's export
pub fn default_export_filename(period: Period, mode: PeriodMode) -> String {
    format!(
        "gastos_{}_{:02}_{}.csv",
        period.year,
        period.month,
        period.tag(mode)
    )
}

/// Export a period's expenses to CSV
pub fn export_period_csv<W: Write>(
    storage: &Storage,
    report: &PeriodReport,
    writer: W,
) -> QuincenaResult<()> {
    let categories = storage.categories.get_all()?;
    let category_names: HashMap<_, _> = categories
        .iter()
        .map(|c| (c.id, c.name.clone()))
        .collect();

    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["Fecha", "Descripcion", "Categorias", "Monto"])
        .map_err(|e| QuincenaError::Export(e.to_string()))?;

    for expense in &report.expenses {
        let names: Vec<&str> = expense
            .category_ids
            .iter()
            .filter_map(|id| category_names.get(id).map(String::as_str))
            .collect();

        csv_writer
            .write_record([
                expense.date.to_string(),
                expense.description.clone(),
                names.join("; "),
                format!("{:.2}", expense.amount.cents() as f64 / 100.0),
            ])
            .map_err(|e| QuincenaError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| QuincenaError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::QuincenaPaths;
    use crate::models::{Category, FundingSource, Money};
    use crate::services::ExpenseService;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = QuincenaPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_default_filename() {
        assert_eq!(
            default_export_filename(Period::new(2024, 4, 1), PeriodMode::Quincenal),
            "gastos_2024_04_Q1.csv"
        );
        assert_eq!(
            default_export_filename(Period::new(2024, 12, 2), PeriodMode::Quincenal),
            "gastos_2024_12_Q2.csv"
        );
        assert_eq!(
            default_export_filename(Period::new(2024, 4, 1), PeriodMode::Mensual),
            "gastos_2024_04_M.csv"
        );
    }

    #[test]
    fn test_export_period_csv() {
        let (_tmp, storage) = setup();

        let category = Category::new("Comida");
        let cat_id = category.id;
        storage.categories.upsert(category).unwrap();

        ExpenseService::new(&storage)
            .add(
                Money::from_cents(123_456),
                "Supermercado, semanal",
                NaiveDate::from_ymd_opt(2024, 4, 10).unwrap(),
                FundingSource::Salary,
                vec![cat_id],
            )
            .unwrap();

        let report = PeriodReport::generate(
            &storage,
            Period::new(2024, 4, 1),
            NaiveDate::from_ymd_opt(2024, 4, 12).unwrap(),
        )
        .unwrap();

        let mut output = Vec::new();
        export_period_csv(&storage, &report, &mut output).unwrap();

        let csv_string = String::from_utf8(output).unwrap();
        assert!(csv_string.contains("Fecha,Descripcion,Categorias,Monto"));
        // The comma in the description forces quoting
        assert!(csv_string.contains("\"Supermercado, semanal\""));
        assert!(csv_string.contains("Comida"));
        assert!(csv_string.contains("1234.56"));
    }

    #[test]
    fn test_export_empty_period_has_header_only() {
        let (_tmp, storage) = setup();

        let report = PeriodReport::generate(
            &storage,
            Period::new(2024, 4, 1),
            NaiveDate::from_ymd_opt(2024, 4, 12).unwrap(),
        )
        .unwrap();

        let mut output = Vec::new();
        export_period_csv(&storage, &report, &mut output).unwrap();

        let csv_string = String::from_utf8(output).unwrap();
        assert_eq!(csv_string.lines().count(), 1);
    }
}
