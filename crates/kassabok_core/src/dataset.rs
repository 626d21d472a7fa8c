//! The in-memory dataset
//!
//! A `Dataset` is the full ordered collection of expense records as last
//! read from the backing store. It is a working copy: mutations here are
//! not visible anywhere else until the caller persists the whole dataset
//! and bumps the session version. Rows are adopted with a fresh `RowId`
//! exactly once; every subtraction and splice after that point goes by id,
//! never by content or position.

use rustc_hash::FxHashSet;

use crate::model::{Record, RowId};

#[derive(Debug, Clone)]
pub struct Dataset {
    rows: Vec<Record>,
    /// Next id to hand out. Starts at 1 so `RowId::UNASSIGNED` (0) can never
    /// collide with an adopted row.
    next_id: u64,
}

impl Default for Dataset {
    fn default() -> Self {
        Self::new()
    }
}

impl Dataset {
    /// Empty but schema-conformant dataset, the fallback when the backend
    /// has no data or cannot be reached.
    pub fn new() -> Dataset {
        Dataset {
            rows: Vec::new(),
            next_id: 1,
        }
    }

    /// Adopt rows read from the backing store: assign ids in order, then run
    /// the load-time normalization pass.
    pub fn from_rows(rows: Vec<Record>) -> Dataset {
        let mut dataset = Dataset::new();
        for row in rows {
            dataset.adopt(row);
        }
        dataset.normalize();
        dataset
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [Record] {
        &mut self.rows
    }

    pub fn get(&self, id: RowId) -> Option<&Record> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// Append one row, assigning it a fresh id. Whatever id the incoming
    /// value carried is discarded; identity is owned by the dataset.
    fn adopt(&mut self, mut row: Record) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        row.id = id;
        self.rows.push(row);
        id
    }

    /// Merge semantics: pure append. Incoming rows land after the existing
    /// ones, base rows keep their order and identity, nothing is deduped.
    /// The derived-field pass then runs over the combined result so rows
    /// left unfinished by an earlier partial fix are caught too. Calling
    /// this twice with the same rows appends twice, intentionally.
    pub fn merge(&mut self, incoming: Vec<Record>) {
        for row in incoming {
            self.adopt(row);
        }
        self.normalize();
    }

    /// The normalization pass shared by load and merge: backfill the derived
    /// price-per-unit wherever its inputs are present. Dates need no string
    /// cleanup here: they were coerced to typed values at the parse
    /// boundary and stay canonical from then on.
    pub fn normalize(&mut self) {
        for row in &mut self.rows {
            row.backfill_price_per_unit();
        }
    }

    /// Remove rows by identity, preserving the order of the remainder.
    pub fn remove_ids(&mut self, ids: &FxHashSet<RowId>) {
        self.rows.retain(|r| !ids.contains(&r.id));
    }

    /// Splice an edited subset back in: drop the original rows by id, then
    /// append the replacements. Replacements that kept their id (edited
    /// rows) keep it; replacements without one (rows added during the edit)
    /// are adopted fresh. Ends with the shared normalization pass.
    pub fn splice(&mut self, original: &FxHashSet<RowId>, edited: Vec<Record>) {
        self.remove_ids(original);
        for row in edited {
            if row.id.is_unassigned() {
                self.adopt(row);
            } else {
                self.rows.push(row);
            }
        }
        self.normalize();
    }

    /// Ids of all current rows, in order.
    pub fn ids(&self) -> Vec<RowId> {
        self.rows.iter().map(|r| r.id).collect()
    }
}
