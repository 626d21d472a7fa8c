use std::path::Path;

use color_eyre::Result;
use color_eyre::eyre::eyre;

use kassabok_core::importer::ImportFormat;
use kassabok_core::{FilterSet, Record, export};

use crate::io::atomic_write_bytes;
use crate::session::Session;
use crate::storage::StorageBackend;

/// Export the (possibly filtered) dataset to a CSV or spreadsheet file,
/// format chosen by the target extension.
pub fn export_file(
    session: &mut Session,
    backend: &dyn StorageBackend,
    path: &Path,
    filter: &FilterSet,
) -> Result<()> {
    let dataset = session.dataset(backend);
    let rows: Vec<Record> = dataset
        .rows()
        .iter()
        .filter(|r| filter.matches(r))
        .cloned()
        .collect();

    if rows.is_empty() {
        println!("No data to export.");
        return Ok(());
    }

    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let bytes = match ImportFormat::from_name(name) {
        Some(ImportFormat::Csv) => export::export_csv(&rows)?,
        Some(ImportFormat::Spreadsheet) => export::export_xlsx(&rows)?,
        None => {
            return Err(eyre!(
                "unsupported export format: {} (expected .csv or .xlsx)",
                path.display()
            ));
        }
    };

    atomic_write_bytes(path, &bytes)?;
    println!("Exported {} rows to {}.", rows.len(), path.display());
    Ok(())
}
