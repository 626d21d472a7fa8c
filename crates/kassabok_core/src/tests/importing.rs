//! Tests for schema reprojection and import failure modes
//!
//! These tests verify that:
//! - Missing schema columns come out null on every imported row
//! - Source columns outside the schema are dropped
//! - Bad dates coerce to null instead of failing the import
//! - The three import errors fire on the right inputs
//! - The import-then-merge scenario pads the Brand column correctly

use crate::dataset::Dataset;
use crate::error::ImportError;
use crate::importer::import_rows;
use crate::model::{Currency, ExpenseType};
use crate::tests::helpers::full_record;

#[test]
fn test_missing_columns_are_padded_with_null() {
    // No Brand, no Quantity, no PricePerUnit in the source
    let csv = b"Date,ExpenseType,Category,Item,Shop,PricePaid,Currency\n\
        2024-01-05,Goods,Food,Bread,ICA,32.5,SEK\n";

    let rows = import_rows(csv, "upload.csv").unwrap();
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    assert_eq!(row.brand, "");
    assert_eq!(row.quantity, None);
    assert_eq!(row.price_per_unit, None);
    assert_eq!(row.category, "Food");
    assert_eq!(row.price_paid, 32.5);
    assert_eq!(row.currency, Currency::Sek);
}

#[test]
fn test_unknown_columns_are_dropped() {
    let csv = b"Date,ExpenseType,Notes,Item\n\
        2024-01-05,Service,this column does not exist,Haircut\n";

    let rows = import_rows(csv, "upload.csv").unwrap();
    assert_eq!(rows[0].item, "Haircut");
    assert_eq!(rows[0].expense_type, Some(ExpenseType::Service));
    // Nothing anywhere for the dropped column to land in
    assert_eq!(rows[0].category, "");
}

#[test]
fn test_bad_dates_become_null() {
    let csv = b"Date,ExpenseType,Item\n\
        soon,Goods,Lamp\n\
        2024-02-30,Goods,Chair\n\
        2024-02-28,Goods,Table\n";

    let rows = import_rows(csv, "upload.csv").unwrap();
    assert_eq!(rows[0].date, None);
    assert_eq!(rows[1].date, None);
    assert!(rows[2].date.is_some());
}

#[test]
fn test_unsupported_extension() {
    let result = import_rows(b"whatever", "upload.pdf");
    assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
}

#[test]
fn test_header_only_file_is_empty() {
    let result = import_rows(b"Date,ExpenseType\n", "upload.csv");
    assert!(matches!(result, Err(ImportError::EmptyFile)));
}

#[test]
fn test_garbage_spreadsheet_is_a_parse_error() {
    let result = import_rows(b"not a zip archive", "upload.xlsx");
    assert!(matches!(result, Err(ImportError::Parse(_))));
}

/// Import a 3-row CSV with no Brand column into a 2-row dataset: 5 rows out,
/// every one carrying the full schema with Brand null on the imported three.
#[test]
fn test_import_merge_scenario_pads_brand() {
    let mut dataset = Dataset::from_rows(vec![
        full_record("Milk", 18.0),
        full_record("Butter", 55.0),
    ]);

    let csv = b"Date,ExpenseType,Category,Item,Shop,PricePaid,Currency\n\
        2024-03-01,Goods,Food,Eggs,Coop,42,SEK\n\
        2024-03-02,Goods,Food,Flour,Coop,19,SEK\n\
        2024-03-03,Goods,Food,Sugar,Coop,25,SEK\n";
    let incoming = import_rows(csv, "upload.csv").unwrap();
    dataset.merge(incoming);

    assert_eq!(dataset.len(), 5);
    assert_eq!(dataset.rows()[0].brand, "Arla");
    for imported in &dataset.rows()[2..] {
        assert_eq!(imported.brand, "");
        assert!(imported.date.is_some());
    }
}
