//! Persistent storage backends
//!
//! Two interchangeable targets hold the dataset: a delimited file next to
//! the config, or a worksheet in a remote sheet document. Which one is in
//! play is configuration; everything above this module sees only the
//! trait. Both expose the same coarse contract (read everything, write
//! everything), and every successful write must be followed by a session
//! version bump before the mutation counts as done (`Session::persist`
//! owns that pairing).

use std::fmt;

use kassabok_core::Dataset;

use crate::config::AppConfig;

mod local;
mod sheet;

pub use local::LocalFileBackend;
pub use sheet::RemoteSheetBackend;

/// Errors from the storage layer.
///
/// `Unavailable` means a read failed: callers degrade to an empty,
/// schema-conformant dataset and warn, never crash. `WriteFailed` aborts
/// the mutation; the in-memory edit state is preserved for the user.
#[derive(Debug, Clone)]
pub enum StorageError {
    Unavailable(String),
    WriteFailed(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable(msg) => write!(f, "backend unavailable: {msg}"),
            StorageError::WriteFailed(msg) => write!(f, "backend write failed: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// A persistence target for the whole dataset.
pub trait StorageBackend {
    /// Stable identifier used as part of the dataset cache key.
    fn identity(&self) -> String;

    /// Read every row. The result is a fresh working copy.
    fn read_all(&self) -> Result<Dataset, StorageError>;

    /// Overwrite the destination with exactly these rows. There is no
    /// partial append at this level; every save rewrites the store.
    fn write_all(&self, dataset: &Dataset) -> Result<(), StorageError>;
}

/// Construct the configured backend.
pub fn open_backend(
    config: &AppConfig,
    data_dir: &std::path::Path,
) -> color_eyre::Result<Box<dyn StorageBackend>> {
    if config.use_remote_sheet {
        tracing::info!(
            "using remote sheet backend ({}/{})",
            config.sheet.document,
            config.sheet.worksheet
        );
        Ok(Box::new(RemoteSheetBackend::from_config(&config.sheet)?))
    } else {
        let path = config.local_file_path(data_dir);
        tracing::info!("using local file backend ({})", path.display());
        Ok(Box::new(LocalFileBackend::new(path)))
    }
}
