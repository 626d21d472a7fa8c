//! Stable row identity
//!
//! Rows carry a synthetic identifier assigned by the dataset the moment they
//! enter it. Identity is positional history, not content: two rows with
//! identical field values are still distinct rows, and sorting or filtering
//! never changes which row is which. Ids are session-scoped and are not
//! written to the backing store.

use serde::{Deserialize, Serialize};

/// Synthetic identifier for a row within a `Dataset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RowId(pub u64);

impl RowId {
    /// Sentinel for rows that have not been adopted by a dataset yet
    /// (importer output, manually entered rows, rows read back from an
    /// edited export). The dataset assigns a real id on adoption.
    pub const UNASSIGNED: RowId = RowId(0);

    pub fn is_unassigned(&self) -> bool {
        *self == Self::UNASSIGNED
    }
}

impl Default for RowId {
    fn default() -> Self {
        Self::UNASSIGNED
    }
}
