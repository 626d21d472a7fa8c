use std::fs;
use std::path::Path;

use color_eyre::Result;

use kassabok_core::audit::{partition, repair};
use kassabok_core::importer::import_rows;
use kassabok_core::{Column, Record, RowId, export};

use crate::io::atomic_write_bytes;
use crate::session::Session;
use crate::storage::StorageBackend;

/// Review and repair incomplete entries.
///
/// Plain `audit` lists what is broken. `--out FILE` writes the incomplete
/// subset as an editable export; `--apply FILE` reads the edited file back,
/// swaps the replacements in by identity and persists. Rows that are still
/// broken after a repair just show up in the next audit.
pub fn audit(
    session: &mut Session,
    backend: &dyn StorageBackend,
    out: Option<&Path>,
    apply: Option<&Path>,
) -> Result<()> {
    let dataset = session.dataset(backend);
    let split = partition(&dataset);

    if split.incomplete.is_empty() {
        println!("No incomplete entries found.");
        return Ok(());
    }
    println!(
        "{} of {} entries are incomplete (missing Date or Expense Type); they are excluded from charts and filters until fixed.",
        split.incomplete.len(),
        dataset.len()
    );

    if let Some(out) = out {
        let bytes = export::export_csv(&split.incomplete)?;
        atomic_write_bytes(out, &bytes)?;
        println!(
            "Incomplete entries written to {}. Edit the file, then re-run with --apply.",
            out.display()
        );
        return Ok(());
    }

    let Some(apply) = apply else {
        for row in &split.incomplete {
            println!("  - {}", describe(row));
        }
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

    let original: Vec<RowId> = split.incomplete.iter().map(|r| r.id).collect();
    let mut updated = dataset;
    repair(&mut updated, &original, edited);

    session.persist(backend, &updated)?;

    let still_broken = partition(&updated).incomplete.len();
    if still_broken == 0 {
        println!("Fixed entries saved; nothing incomplete remains.");
    } else {
        println!("Fixed entries saved; {still_broken} entries are still incomplete.");
    }
    Ok(())
}

fn describe(row: &Record) -> String {
    let mut missing = Vec::new();
    if row.date.is_none() {
        missing.push("Date");
    }
    if row.expense_type.is_none() {
        missing.push("ExpenseType");
    }
    format!(
        "{} / {} / {} {} (missing {})",
        row.cell(Column::Category),
        row.cell(Column::Item),
        row.cell(Column::PricePaid),
        row.cell(Column::Currency),
        missing.join(" and ")
    )
}
