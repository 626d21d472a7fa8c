//! Tabular export
//!
//! Exports carry the exact schema column set in canonical order, header row
//! first, so that export-then-import reproduces the same rows. Both
//! functions accept any row slice, so a filtered view exports the same way as
//! the full dataset.

use rust_xlsxwriter::Workbook;

use crate::error::ExportError;
use crate::model::{Column, Record, header_row};

/// UTF-8 CSV byte stream with the canonical header.
pub fn export_csv(rows: &[Record]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    writer
        .write_record(header_row())
        .map_err(|e| ExportError::Csv(e.to_string()))?;
    for row in rows {
        writer
            .write_record(row.cells())
            .map_err(|e| ExportError::Csv(e.to_string()))?;
    }
    writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.to_string()))
}

/// Single-worksheet spreadsheet byte stream. Numeric columns are written as
/// numbers, everything else as text; absent cells stay blank.
pub fn export_xlsx(rows: &[Record]) -> Result<Vec<u8>, ExportError> {
    let xlsx = |e: rust_xlsxwriter::XlsxError| ExportError::Spreadsheet(e.to_string());

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Transactions").map_err(xlsx)?;

    for (col, name) in header_row().iter().enumerate() {
        worksheet.write_string(0, col as u16, *name).map_err(xlsx)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        for (c, column) in Column::ALL.iter().enumerate() {
            let col = c as u16;
            match column {
                Column::PricePaid => {
                    worksheet.write_number(r, col, row.price_paid).map_err(xlsx)?;
                }
                Column::Quantity => {
                    if let Some(quantity) = row.quantity {
                        worksheet.write_number(r, col, quantity).map_err(xlsx)?;
                    }
                }
                Column::PricePerUnit => {
                    if let Some(ppu) = row.price_per_unit {
                        worksheet.write_number(r, col, ppu).map_err(xlsx)?;
                    }
                }
                _ => {
                    let text = row.cell(*column);
                    if !text.is_empty() {
                        worksheet.write_string(r, col, &text).map_err(xlsx)?;
                    }
                }
            }
        }
    }

    workbook.save_to_buffer().map_err(xlsx)
}
