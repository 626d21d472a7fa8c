//! Completeness auditing
//!
//! Rows missing Date or ExpenseType stay in storage but are held out of
//! every aggregated view until someone fixes them. The partition is total
//! and disjoint; repair swaps the incomplete originals for their edited
//! replacements by identity and re-runs normalization. Nothing forces a
//! repair to actually complete a row; still-broken rows just show up in
//! the next partition.

use rustc_hash::FxHashSet;

use crate::dataset::Dataset;
use crate::model::{Record, RowId};

/// The dataset split into complete and incomplete rows. Together the two
/// sides hold every row exactly once, ids preserved.
#[derive(Debug, Clone)]
pub struct Partition {
    pub complete: Vec<Record>,
    pub incomplete: Vec<Record>,
}

/// Partition by the completeness rule (Date and ExpenseType both present).
pub fn partition(dataset: &Dataset) -> Partition {
    let mut complete = Vec::new();
    let mut incomplete = Vec::new();
    for row in dataset.rows() {
        if row.is_complete() {
            complete.push(row.clone());
        } else {
            incomplete.push(row.clone());
        }
    }
    Partition {
        complete,
        incomplete,
    }
}

/// Replace the rows named in `original` with `edited`: remove by identity,
/// append the replacements, normalize the combined result.
pub fn repair(dataset: &mut Dataset, original: &[RowId], edited: Vec<Record>) {
    let removed: FxHashSet<RowId> = original.iter().copied().collect();
    dataset.splice(&removed, edited);
}
