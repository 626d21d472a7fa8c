use std::fs;
use std::path::Path;

use color_eyre::Result;

use kassabok_core::importer::import_rows;
use kassabok_core::{EditSession, Scope, export};

use crate::io::atomic_write_bytes;
use crate::session::Session;
use crate::storage::StorageBackend;

/// Scoped editing of one year or one month.
///
/// `--out FILE` exports the scoped subset as the editable surface;
/// `--apply FILE` reads it back and runs one pass of the edit session:
/// diff against the snapshot, recompute derived fields, splice into the
/// full dataset, persist. Rows outside the scope are untouched by
/// construction. An unchanged file is an empty diff and saves nothing.
pub fn edit(
    session: &mut Session,
    backend: &dyn StorageBackend,
    year: i16,
    month: Option<i8>,
    out: Option<&Path>,
    apply: Option<&Path>,
) -> Result<()> {
    let dataset = session.dataset(backend);
    let scope = match month {
        Some(month) => Scope::month(year, month),
        None => Scope::year(year),
    };
    let mut edit_session = EditSession::browse(&dataset, scope);

    if edit_session.snapshot().is_empty() {
        println!("No entries in the selected period.");
        return Ok(());
    }
    println!("{} entries in scope.", edit_session.snapshot().len());

    if let Some(out) = out {
        let bytes = export::export_csv(edit_session.snapshot())?;
        atomic_write_bytes(out, &bytes)?;
        println!(
            "Scoped entries written to {}. Edit the file (rows may be changed, removed or added), then re-run with --apply.",
            out.display()
        );
        return Ok(());
    }

    let Some(apply) = apply else {
        println!("Run with --out FILE to get an editable copy.");
        return Ok(());
    };

    let bytes = fs::read(apply)?;
    let name = apply.file_name().and_then(|n| n.to_str()).unwrap_or("edited");
    let edited = match import_rows(&bytes, name) {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("Could not read {}: {e}. Dataset unchanged.", apply.display());
            return Ok(());
        }
    };

    edit_session.begin_editing();
    edit_session.load_working(edited);

    let diff = edit_session.diff();
    if diff.is_empty() {
        // No save affordance for an empty diff; this is a no-op, not an error
        println!("No changes detected; nothing to save.");
        return Ok(());
    }
    println!(
        "{} changed, {} removed, {} added.",
        diff.changed.len(),
        diff.removed.len(),
        diff.added
    );

    let Some(reconstructed) = edit_session.begin_save(&dataset) else {
        return Ok(());
    };

    match session.persist(backend, &reconstructed) {
        Ok(()) => {
            edit_session.committed();
            println!("Saved. {} entries total.", reconstructed.len());
        }
        Err(e) => {
            edit_session.failed();
            edit_session.resume_editing();
            eprintln!(
                "Save failed: {e}. Your edits in {} are untouched; re-run to retry.",
                apply.display()
            );
        }
    }
    Ok(())
}
