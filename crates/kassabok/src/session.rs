//! Session context
//!
//! All process-wide mutable state lives in this one explicit object rather
//! than in ambient globals: the monotonic version counter, the dataset
//! cache it keys, and the staged import waiting for a merge. One `Session`
//! serves one interactive user; nothing here is shared across threads.
//!
//! Initialization: version 0, empty cache, no pending import. `reset`
//! returns to exactly that state. The version is bumped exactly once per
//! successful persist and carries no meaning beyond cache busting.

use std::time::{Duration, Instant};

use kassabok_core::{Dataset, Record};

use crate::storage::{StorageBackend, StorageError};

struct CacheEntry {
    backend: String,
    version: u64,
    loaded_at: Instant,
    dataset: Dataset,
}

pub struct Session {
    version: u64,
    ttl: Duration,
    cache: Option<CacheEntry>,
    /// Imported rows staged for merging, and the flag that arms the merge.
    /// Mirrors the two-step import flow: parse first, merge on confirm.
    pub pending_import: Option<Vec<Record>>,
    pub merge_ready: bool,
}

impl Session {
    /// `ttl` is the safety net on the dataset cache: even with no version
    /// bump in sight, an entry older than this is re-read. It guards
    /// against a forgotten bump turning into a permanently stale view.
    pub fn new(ttl: Duration) -> Session {
        Session {
            version: 0,
            ttl,
            cache: None,
            pending_import: None,
            merge_ready: false,
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Invalidate the dataset cache. Called by `persist`; also the escape
    /// hatch when the backend is known to have changed underneath us.
    pub fn bump_version(&mut self) {
        self.version += 1;
        tracing::debug!(version = self.version, "data version bumped");
    }

    /// The current dataset, memoized by (backend identity, version) with
    /// the TTL as a backstop. A failed read degrades to an empty dataset
    /// with a warning; the session keeps going, it never crashes here.
    pub fn dataset(&mut self, backend: &dyn StorageBackend) -> Dataset {
        let identity = backend.identity();
        if let Some(entry) = &self.cache {
            if entry.backend == identity
                && entry.version == self.version
                && entry.loaded_at.elapsed() < self.ttl
            {
                return entry.dataset.clone();
            }
        }

        let dataset = match backend.read_all() {
            Ok(dataset) => dataset,
            Err(e) => {
                tracing::warn!("could not read backend, continuing with empty dataset: {e}");
                eprintln!("Warning: {e}; starting from an empty dataset.");
                Dataset::new()
            }
        };

        self.cache = Some(CacheEntry {
            backend: identity,
            version: self.version,
            loaded_at: Instant::now(),
            dataset: dataset.clone(),
        });
        dataset
    }

    /// Write the whole dataset and bump the version. The write does not
    /// count as complete until the bump has happened; every mutating
    /// command goes through here so the next read cannot see a stale cache.
    pub fn persist(
        &mut self,
        backend: &dyn StorageBackend,
        dataset: &Dataset,
    ) -> Result<(), StorageError> {
        backend.write_all(dataset)?;
        self.bump_version();
        Ok(())
    }

    /// Back to the initial state: version 0, cold cache, nothing staged.
    pub fn reset(&mut self) {
        self.version = 0;
        self.cache = None;
        self.pending_import = None;
        self.merge_ready = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use kassabok_core::ExpenseType;

    /// Backend stub that counts reads and can be told to fail.
    struct StubBackend {
        reads: Cell<usize>,
        writes: Cell<usize>,
        rows: RefCell<Vec<Record>>,
        fail_reads: bool,
        fail_writes: bool,
    }

    impl StubBackend {
        fn new(rows: Vec<Record>) -> StubBackend {
            StubBackend {
                reads: Cell::new(0),
                writes: Cell::new(0),
                rows: RefCell::new(rows),
                fail_reads: false,
                fail_writes: false,
            }
        }
    }

    impl StorageBackend for StubBackend {
        fn identity(&self) -> String {
            "stub".to_string()
        }

        fn read_all(&self) -> Result<Dataset, StorageError> {
            self.reads.set(self.reads.get() + 1);
            if self.fail_reads {
                return Err(StorageError::Unavailable("stub offline".to_string()));
            }
            Ok(Dataset::from_rows(self.rows.borrow().clone()))
        }

        fn write_all(&self, dataset: &Dataset) -> Result<(), StorageError> {
            self.writes.set(self.writes.get() + 1);
            if self.fail_writes {
                return Err(StorageError::WriteFailed("stub full".to_string()));
            }
            *self.rows.borrow_mut() = dataset.rows().to_vec();
            Ok(())
        }
    }

    fn row(item: &str) -> Record {
        let mut r = Record::empty();
        r.date = Some(jiff::civil::date(2024, 8, 1));
        r.expense_type = Some(ExpenseType::Goods);
        r.item = item.to_string();
        r
    }

    #[test]
    fn test_same_version_reads_once() {
        let backend = StubBackend::new(vec![row("a")]);
        let mut session = Session::new(Duration::from_secs(300));

        let first = session.dataset(&backend);
        let second = session.dataset(&backend);
        assert_eq!(backend.reads.get(), 1);
        assert_eq!(first.len(), second.len());
    }

    #[test]
    fn test_bump_forces_exactly_one_fresh_read() {
        let backend = StubBackend::new(vec![row("a")]);
        let mut session = Session::new(Duration::from_secs(300));

        session.dataset(&backend);
        session.bump_version();
        session.dataset(&backend);
        session.dataset(&backend);
        assert_eq!(backend.reads.get(), 2);
    }

    #[test]
    fn test_persist_bumps_and_next_read_sees_new_data() {
        let backend = StubBackend::new(vec![row("a")]);
        let mut session = Session::new(Duration::from_secs(300));

        let mut dataset = session.dataset(&backend);
        dataset.merge(vec![row("b")]);
        session.persist(&backend, &dataset).unwrap();

        // Not the dataset cached under the prior version
        let reloaded = session.dataset(&backend);
        assert_eq!(reloaded.len(), 2);
        assert_eq!(backend.writes.get(), 1);
        assert_eq!(session.version(), 1);
    }

    #[test]
    fn test_ttl_expiry_rereads_without_a_bump() {
        let backend = StubBackend::new(vec![row("a")]);
        let mut session = Session::new(Duration::ZERO);

        session.dataset(&backend);
        session.dataset(&backend);
        assert_eq!(backend.reads.get(), 2);
    }

    #[test]
    fn test_unavailable_backend_degrades_to_empty() {
        let mut backend = StubBackend::new(vec![row("a")]);
        backend.fail_reads = true;
        let mut session = Session::new(Duration::from_secs(300));

        let dataset = session.dataset(&backend);
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_failed_write_does_not_bump() {
        let mut backend = StubBackend::new(vec![]);
        backend.fail_writes = true;
        let mut session = Session::new(Duration::from_secs(300));

        let result = session.persist(&backend, &Dataset::new());
        assert!(matches!(result, Err(StorageError::WriteFailed(_))));
        assert_eq!(session.version(), 0);
    }

    #[test]
    fn test_reset_returns_to_initial_state() {
        let backend = StubBackend::new(vec![row("a")]);
        let mut session = Session::new(Duration::from_secs(300));

        session.dataset(&backend);
        session.bump_version();
        session.pending_import = Some(vec![row("x")]);
        session.merge_ready = true;

        session.reset();
        assert_eq!(session.version(), 0);
        assert!(session.pending_import.is_none());
        assert!(!session.merge_ready);

        // Cold cache: next access reads again
        session.dataset(&backend);
        assert_eq!(backend.reads.get(), 2);
    }
}
