//! Local delimited-file backend
//!
//! Same layout as the remote worksheet: header row first, one row per
//! record. A file that does not exist yet simply means an empty dataset.
//! Writes are staged and swapped into place, so an interruption mid-save
//! leaves the previous file intact rather than an empty or truncated one.

use std::fs;
use std::path::PathBuf;

use kassabok_core::{Dataset, ImportError, export, importer};

use crate::io::atomic_write_bytes;
use crate::storage::{StorageBackend, StorageError};

pub struct LocalFileBackend {
    path: PathBuf,
}

impl LocalFileBackend {
    pub fn new(path: PathBuf) -> LocalFileBackend {
        LocalFileBackend { path }
    }
}

impl StorageBackend for LocalFileBackend {
    fn identity(&self) -> String {
        format!("file:{}", self.path.display())
    }

    fn read_all(&self) -> Result<Dataset, StorageError> {
        if !self.path.exists() {
            return Ok(Dataset::new());
        }
        let bytes = fs::read(&self.path)
            .map_err(|e| StorageError::Unavailable(format!("{}: {e}", self.path.display())))?;

        match importer::parse(&bytes, importer::ImportFormat::Csv) {
            Ok(rows) => Ok(Dataset::from_rows(rows)),
            // A file holding only the header (or nothing) is an empty
            // dataset, not a failure.
            Err(ImportError::EmptyFile) => Ok(Dataset::new()),
            Err(e) => Err(StorageError::Unavailable(format!(
                "{}: {e}",
                self.path.display()
            ))),
        }
    }

    fn write_all(&self, dataset: &Dataset) -> Result<(), StorageError> {
        let bytes =
            export::export_csv(dataset.rows()).map_err(|e| StorageError::WriteFailed(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| StorageError::WriteFailed(format!("create dir: {e}")))?;
        }
        atomic_write_bytes(&self.path, &bytes)
            .map_err(|e| StorageError::WriteFailed(format!("{}: {e}", self.path.display())))?;

        tracing::debug!(rows = dataset.len(), path = %self.path.display(), "dataset written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kassabok_core::{ExpenseType, Record};
    use tempfile::tempdir;

    fn record(item: &str) -> Record {
        let mut r = Record::empty();
        r.date = Some(jiff::civil::date(2024, 7, 1));
        r.expense_type = Some(ExpenseType::Goods);
        r.item = item.to_string();
        r.price_paid = 10.0;
        r
    }

    #[test]
    fn test_missing_file_reads_as_empty_dataset() {
        let dir = tempdir().unwrap();
        let backend = LocalFileBackend::new(dir.path().join("nope.csv"));
        assert!(backend.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_write_then_read_round_trips() {
        let dir = tempdir().unwrap();
        let backend = LocalFileBackend::new(dir.path().join("expenses.csv"));

        let dataset = Dataset::from_rows(vec![record("a"), record("b")]);
        backend.write_all(&dataset).unwrap();

        let loaded = backend.read_all().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.rows()[0].item, "a");
        assert_eq!(loaded.rows()[1].item, "b");
    }

    #[test]
    fn test_write_is_a_full_overwrite() {
        let dir = tempdir().unwrap();
        let backend = LocalFileBackend::new(dir.path().join("expenses.csv"));

        backend
            .write_all(&Dataset::from_rows(vec![record("a"), record("b")]))
            .unwrap();
        backend
            .write_all(&Dataset::from_rows(vec![record("c")]))
            .unwrap();

        let loaded = backend.read_all().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.rows()[0].item, "c");
    }

    #[test]
    fn test_unreadable_content_is_unavailable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("expenses.csv");
        // Invalid UTF-8 in a row makes the csv reader fail
        fs::write(&path, b"Date,ExpenseType\n\xff\xfe,Goods\n").unwrap();

        let backend = LocalFileBackend::new(path);
        assert!(matches!(
            backend.read_all(),
            Err(StorageError::Unavailable(_))
        ));
    }
}
