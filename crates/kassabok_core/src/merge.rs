//! Import merging
//!
//! The merge itself lives on `Dataset::merge` and is a pure append: no
//! dedup, base rows untouched, repeated imports of the same file stack up
//! duplicates. That is the contract, not an accident. Collapsing repeats
//! is a user decision, so the only thing offered here is an explicit
//! preview of which incoming rows already exist content-wise.

use rustc_hash::FxHashSet;

use crate::dataset::Dataset;
use crate::model::Record;

/// Indices (into `incoming`) of rows whose cell content already appears in
/// the dataset. Purely informational: shown before a merge so the user can
/// tell a re-import from fresh data. Identity plays no part here; this is
/// a content comparison.
pub fn find_duplicates(base: &Dataset, incoming: &[Record]) -> Vec<usize> {
    let existing: FxHashSet<Vec<String>> = base.rows().iter().map(|r| r.cells()).collect();

    incoming
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            // Compare what the row would look like once merged: the merge
            // pass backfills the derived unit price before anything is read
            // back.
            let mut normalized = (*row).clone();
            normalized.backfill_price_per_unit();
            existing.contains(&normalized.cells())
        })
        .map(|(i, _)| i)
        .collect()
}
