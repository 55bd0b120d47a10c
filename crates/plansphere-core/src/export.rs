//! Expense CSV export and import
//!
//! The export format is stable and round-trips through the importer: header
//! row, quoted fields only where needed, amounts written without trailing
//! zero padding so re-imported values compare equal.

use std::io::Read;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::Expense;

/// Header row of an expense CSV export.
pub const EXPENSE_CSV_HEADER: &str = "Date,Category,Subcategory,Description,Amount";

/// Serialize expenses to CSV, one row per expense in input order.
pub fn expenses_to_csv(expenses: &[Expense]) -> String {
    let mut out = String::from(EXPENSE_CSV_HEADER);
    out.push('\n');
    for expense in expenses {
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            escape_csv_field(&expense.date),
            escape_csv_field(&expense.category),
            escape_csv_field(&expense.subcategory),
            escape_csv_field(&expense.description),
            expense.amount
        ));
    }
    out
}

/// Parse expenses from CSV produced by [`expenses_to_csv`] (or a compatible
/// spreadsheet export). Each imported expense gets a fresh id.
pub fn expenses_from_csv<R: Read>(reader: R) -> Result<Vec<Expense>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut expenses = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        if record.len() < 5 {
            return Err(Error::InvalidData(format!(
                "expected 5 columns, found {}",
                record.len()
            )));
        }
        let amount: f64 = record[4]
            .parse()
            .map_err(|_| Error::InvalidData(format!("invalid amount: {}", &record[4])))?;
        let mut expense = Expense::new(&record[1], &record[2], amount, &record[3]);
        expense.date = record[0].to_string();
        expenses.push(expense);
    }

    debug!(count = expenses.len(), "imported expenses from CSV");
    Ok(expenses)
}

fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(date: &str, category: &str, sub: &str, description: &str, amount: f64) -> Expense {
        let mut e = Expense::new(category, sub, amount, description);
        e.date = date.to_string();
        e
    }

    #[test]
    fn test_export_escapes_commas_and_quotes() {
        let expenses = vec![expense(
            "2025-01-01",
            "Food",
            "Restaurants",
            "Dinner, \"fancy\"",
            42.5,
        )];
        let csv = expenses_to_csv(&expenses);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(EXPENSE_CSV_HEADER));
        assert_eq!(
            lines.next(),
            Some(r#"2025-01-01,Food,Restaurants,"Dinner, ""fancy""",42.5"#)
        );
    }

    #[test]
    fn test_amount_formatting_is_exact() {
        let csv = expenses_to_csv(&[expense("2025-02-03", "Other", "General", "visa", 100.0)]);
        assert!(csv.contains(",100\n"));
        let csv = expenses_to_csv(&[expense("2025-02-03", "Other", "General", "sim", 9.99)]);
        assert!(csv.contains(",9.99\n"));
    }

    #[test]
    fn test_round_trip_preserves_fields() {
        let original = vec![
            expense("2025-01-01", "Food", "Restaurants", "Dinner, \"fancy\"", 42.5),
            expense("2025-01-02", "Transport", "Taxi", "Airport run\nlate night", 23.0),
        ];
        let csv = expenses_to_csv(&original);
        let imported = expenses_from_csv(csv.as_bytes()).unwrap();

        assert_eq!(imported.len(), 2);
        for (a, b) in original.iter().zip(&imported) {
            assert_eq!(a.date, b.date);
            assert_eq!(a.category, b.category);
            assert_eq!(a.subcategory, b.subcategory);
            assert_eq!(a.description, b.description);
            assert_eq!(a.amount, b.amount);
            // imports mint fresh ids
            assert_ne!(a.id, b.id);
        }
    }

    #[test]
    fn test_import_rejects_bad_amount() {
        let csv = "Date,Category,Subcategory,Description,Amount\n2025-01-01,Food,Snacks,chips,abc\n";
        let err = expenses_from_csv(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("invalid amount"));
    }

    #[test]
    fn test_import_empty_file_yields_no_expenses() {
        let csv = "Date,Category,Subcategory,Description,Amount\n";
        let imported = expenses_from_csv(csv.as_bytes()).unwrap();
        assert!(imported.is_empty());
    }
}
