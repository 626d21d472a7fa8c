//! Scoped edit sessions
//!
//! An `EditSession` walks one pass of the edit cycle:
//!
//! ```text
//! Browsing -> Editing -> Saving -> Committed
//!                            \---> Failed (work intact, back to Editing)
//! ```
//!
//! The session snapshots the scoped subset when it opens. Identity for the
//! later subtraction is the snapshot's row ids: taken at Browsing entry,
//! never recomputed from content, so two rows with identical cells remain
//! distinct. The reconstruction on save happens on a copy of the full
//! dataset; if persisting fails, nothing the user typed is lost.

use rustc_hash::FxHashSet;

use crate::dataset::Dataset;
use crate::model::{Record, RowId};
use crate::scope::Scope;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Browsing,
    Editing,
    Saving,
    Committed,
    Failed,
}

/// What changed relative to the snapshot, recomputed on every observation.
#[derive(Debug, Clone, PartialEq)]
pub struct RowDiff {
    /// Rows present in the working set that the snapshot never had.
    pub added: usize,
    /// Snapshot rows no longer present, by identity.
    pub removed: Vec<RowId>,
    /// Snapshot rows whose cells changed, by identity.
    pub changed: Vec<RowId>,
}

impl RowDiff {
    pub fn is_empty(&self) -> bool {
        self.added == 0 && self.removed.is_empty() && self.changed.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct EditSession {
    scope: Scope,
    state: EditState,
    snapshot: Vec<Record>,
    working: Vec<Record>,
}

impl EditSession {
    /// Open a session on the scoped subset of `dataset`. Initial state is
    /// `Browsing`; the snapshot taken here is the identity baseline for the
    /// whole session.
    pub fn browse(dataset: &Dataset, scope: Scope) -> EditSession {
        let snapshot: Vec<Record> = dataset
            .rows()
            .iter()
            .filter(|r| scope.matches(r))
            .cloned()
            .collect();
        EditSession {
            scope,
            state: EditState::Browsing,
            working: snapshot.clone(),
            snapshot,
        }
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn snapshot(&self) -> &[Record] {
        &self.snapshot
    }

    pub fn working(&self) -> &[Record] {
        &self.working
    }

    /// Move to `Editing`. No-op unless browsing.
    pub fn begin_editing(&mut self) {
        if self.state == EditState::Browsing {
            self.state = EditState::Editing;
        }
    }

    /// Mutable access to the working rows while editing.
    pub fn working_mut(&mut self) -> Option<&mut Vec<Record>> {
        if self.state == EditState::Editing {
            Some(&mut self.working)
        } else {
            None
        }
    }

    /// Replace the working set with rows read back from an editable surface
    /// (an edited export, a table widget). Identity is adopted positionally
    /// against the snapshot: row i inherits snapshot row i's id, surplus
    /// rows count as additions. An untouched surface therefore produces an
    /// empty diff.
    pub fn load_working(&mut self, mut rows: Vec<Record>) {
        if self.state != EditState::Editing {
            return;
        }
        for (i, row) in rows.iter_mut().enumerate() {
            row.id = match self.snapshot.get(i) {
                Some(original) => original.id,
                None => RowId::UNASSIGNED,
            };
        }
        self.working = rows;
    }

    /// Diff of working set against the snapshot.
    pub fn diff(&self) -> RowDiff {
        let added = self
            .working
            .iter()
            .filter(|r| r.id.is_unassigned())
            .count();

        let mut removed = Vec::new();
        let mut changed = Vec::new();
        for original in &self.snapshot {
            match self.working.iter().find(|w| w.id == original.id) {
                None => removed.push(original.id),
                Some(edited) if !edited.same_content(original) => changed.push(original.id),
                Some(_) => {}
            }
        }

        RowDiff {
            added,
            removed,
            changed,
        }
    }

    /// Whether a save affordance should exist at all.
    pub fn can_save(&self) -> bool {
        self.state == EditState::Editing && !self.diff().is_empty()
    }

    /// Start saving: recompute the derived unit price over the edited subset,
    /// rebuild the full dataset on a copy (everything outside the snapshot
    /// untouched, by identity), and hand the copy back for persistence.
    ///
    /// Saving with an empty diff is a no-op, not an error: the session
    /// stays where it was and `None` comes back.
    pub fn begin_save(&mut self, dataset: &Dataset) -> Option<Dataset> {
        if !self.can_save() {
            return None;
        }

        let mut edited = self.working.clone();
        for row in &mut edited {
            row.recompute_price_per_unit();
        }

        let original: FxHashSet<RowId> = self.snapshot.iter().map(|r| r.id).collect();
        let mut reconstructed = dataset.clone();
        reconstructed.splice(&original, edited);

        self.state = EditState::Saving;
        Some(reconstructed)
    }

    /// Persist succeeded. The caller bumps the version and opens a fresh
    /// session on the reloaded data.
    pub fn committed(&mut self) {
        if self.state == EditState::Saving {
            self.state = EditState::Committed;
        }
    }

    /// Persist failed. The working set and its diff are intact; nothing the
    /// user typed has been lost.
    pub fn failed(&mut self) {
        if self.state == EditState::Saving {
            self.state = EditState::Failed;
        }
    }

    /// Return from `Failed` to `Editing` to retry or adjust.
    pub fn resume_editing(&mut self) {
        if self.state == EditState::Failed {
            self.state = EditState::Editing;
        }
    }
}
