use std::fs;
use std::path::Path;

use color_eyre::Result;

use kassabok_core::importer::import_rows;
use kassabok_core::merge::find_duplicates;

use crate::session::Session;
use crate::storage::StorageBackend;

/// Import a tabular file and merge it into the dataset.
///
/// Two-step flow: the parsed rows are staged on the session first, then
/// merged. `--dry-run` stops after staging so the user can look at the
/// preview; without it the merge runs immediately. A parse failure aborts
/// with a message and leaves the dataset untouched; a write failure keeps
/// the staged rows so nothing typed or uploaded is lost.
pub fn import_file(
    session: &mut Session,
    backend: &dyn StorageBackend,
    path: &Path,
    dry_run: bool,
) -> Result<()> {
    let bytes = fs::read(path)?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload");

    let rows = match import_rows(&bytes, name) {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!("import of {} failed: {e}", path.display());
            eprintln!("Import failed: {e}. Dataset unchanged.");
            return Ok(());
        }
    };

    let dataset = session.dataset(backend);
    let duplicates = find_duplicates(&dataset, &rows);
    println!("{} rows parsed from {}.", rows.len(), path.display());
    if !duplicates.is_empty() {
        println!(
            "Note: {} of them match existing rows; importing will append them again.",
            duplicates.len()
        );
    }

    session.pending_import = Some(rows);
    session.merge_ready = !dry_run;
    if !session.merge_ready {
        println!("Dry run: nothing merged.");
        return Ok(());
    }

    // Stage consumed only on a successful save
    let Some(staged) = session.pending_import.clone() else {
        return Ok(());
    };
    let staged_len = staged.len();

    let mut updated = dataset;
    updated.merge(staged);

    match session.persist(backend, &updated) {
        Ok(()) => {
            session.pending_import = None;
            session.merge_ready = false;
            tracing::info!(rows = staged_len, "import merged");
            println!("Merged {staged_len} rows ({} entries total).", updated.len());
        }
        Err(e) => {
            // Staged rows stay on the session for a retry
            eprintln!("Save failed: {e}. The imported rows are still staged; re-run to retry.");
        }
    }
    Ok(())
}
