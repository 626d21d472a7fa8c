//! Tabular import
//!
//! Uploads arrive as raw bytes in one of two fixed formats, chosen by file
//! extension. Whatever the source looks like, the output is a row set
//! reprojected onto the schema: source columns the schema does not know are
//! dropped (a deliberate narrowing: the storage layout cannot carry them),
//! schema columns the source lacks come out null. Cell coercion never
//! raises: bad dates become null, bad numbers become absent, unknown
//! currency codes are preserved verbatim.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};

use crate::date;
use crate::error::ImportError;
use crate::model::{Column, Currency, ExpenseType, Record};

/// The two recognized upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Csv,
    Spreadsheet,
}

impl ImportFormat {
    /// Pick a format from a file name. `None` means unsupported.
    pub fn from_name(name: &str) -> Option<ImportFormat> {
        let lower = name.to_ascii_lowercase();
        if lower.ends_with(".csv") {
            Some(ImportFormat::Csv)
        } else if lower.ends_with(".xlsx") {
            Some(ImportFormat::Spreadsheet)
        } else {
            None
        }
    }
}

/// Parse an uploaded file into schema-conformant rows.
///
/// The rows are not yet part of any dataset; ids are assigned when the
/// caller merges them in.
pub fn import_rows(bytes: &[u8], source_name: &str) -> Result<Vec<Record>, ImportError> {
    let format = ImportFormat::from_name(source_name)
        .ok_or_else(|| ImportError::UnsupportedFormat(source_name.to_string()))?;
    parse(bytes, format)
}

/// Parse with an explicit format, bypassing extension sniffing. The local
/// storage backend reads its delimited file through this.
pub fn parse(bytes: &[u8], format: ImportFormat) -> Result<Vec<Record>, ImportError> {
    let (header, rows) = match format {
        ImportFormat::Csv => read_csv(bytes)?,
        ImportFormat::Spreadsheet => read_xlsx(bytes)?,
    };
    if rows.is_empty() {
        return Err(ImportError::EmptyFile);
    }
    Ok(project(&header, rows))
}

/// Reproject already-split cells onto the schema. The remote sheet backend
/// feeds its wire payload through this.
pub fn rows_from_cells(header: &[String], rows: Vec<Vec<String>>) -> Vec<Record> {
    project(header, rows)
}

fn read_csv(bytes: &[u8]) -> Result<(Vec<String>, Vec<Vec<String>>), ImportError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(bytes);
    let header: Vec<String> = reader
        .headers()
        .map_err(|e| ImportError::Parse(format!("csv header: {e}")))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| ImportError::Parse(format!("csv row: {e}")))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok((header, rows))
}

fn read_xlsx(bytes: &[u8]) -> Result<(Vec<String>, Vec<Vec<String>>), ImportError> {
    let mut workbook = Xlsx::new(Cursor::new(bytes.to_vec()))
        .map_err(|e| ImportError::Parse(format!("xlsx: {e}")))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ImportError::EmptyFile)?
        .map_err(|e| ImportError::Parse(format!("xlsx sheet: {e}")))?;

    let mut row_iter = range.rows();
    let header = match row_iter.next() {
        Some(cells) => cells.iter().map(cell_text).collect(),
        None => return Err(ImportError::EmptyFile),
    };
    let rows = row_iter
        .map(|cells| cells.iter().map(cell_text).collect())
        .collect();
    Ok((header, rows))
}

/// Flatten a spreadsheet cell to the storage string form. Native date cells
/// come through as serial day numbers and are rendered as ISO dates so the
/// shared coercion path handles them like any other source.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(v) => v.to_string(),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(dt) => match date::from_excel_serial(dt.as_f64()) {
            Some(d) => d.to_string(),
            None => dt.as_f64().to_string(),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(_) => String::new(),
    }
}

fn project(header: &[String], rows: Vec<Vec<String>>) -> Vec<Record> {
    let mapping: Vec<Option<Column>> = header.iter().map(|h| Column::parse(h)).collect();

    rows.into_iter()
        .map(|cells| {
            let mut record = Record::empty();
            for (i, cell) in cells.iter().enumerate() {
                if let Some(Some(column)) = mapping.get(i) {
                    apply_cell(&mut record, *column, cell);
                }
            }
            record
        })
        .collect()
}

fn apply_cell(record: &mut Record, column: Column, cell: &str) {
    match column {
        Column::Date => record.date = date::parse_date(cell),
        Column::ExpenseType => record.expense_type = ExpenseType::parse(cell),
        Column::Category => record.category = cell.trim().to_string(),
        Column::Subcategory => record.subcategory = cell.trim().to_string(),
        Column::Item => record.item = cell.trim().to_string(),
        Column::Brand => record.brand = cell.trim().to_string(),
        Column::Shop => record.shop = cell.trim().to_string(),
        Column::PricePaid => record.price_paid = parse_number(cell).unwrap_or(0.0),
        Column::Currency => record.currency = Currency::parse(cell, &Currency::default()),
        Column::Quantity => record.quantity = parse_number(cell),
        Column::QuantityUnit => record.quantity_unit = cell.trim().to_string(),
        Column::PricePerUnit => record.price_per_unit = parse_number(cell),
    }
}

/// Coerce a numeric cell, tolerating formatting noise: regular and
/// non-breaking spaces are stripped, a lone comma with no dot is read as a
/// decimal separator, otherwise commas are thousands separators.
fn parse_number(cell: &str) -> Option<f64> {
    let stripped: String = cell
        .trim()
        .chars()
        .filter(|c| *c != ' ' && *c != '\u{a0}')
        .collect();
    if stripped.is_empty() {
        return None;
    }

    let normalized = if stripped.matches(',').count() == 1 && !stripped.contains('.') {
        stripped.replace(',', ".")
    } else {
        stripped.replace(',', "")
    };
    normalized.parse::<f64>().ok()
}
