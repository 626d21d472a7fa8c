//! kassabok application shell
//!
//! Everything the dataset core deliberately does not own lives here: the
//! two storage backends (local delimited file, remote sheet), the session
//! context with its version counter and TTL-guarded dataset cache, YAML
//! configuration, file logging, the exchange-rate lookup and the CLI
//! command handlers.

pub mod actions;
pub mod config;
pub mod format;
pub mod io;
pub mod logging;
pub mod rates;
pub mod session;
pub mod storage;

pub use config::AppConfig;
pub use logging::init_logging;
pub use session::Session;
pub use storage::{StorageBackend, StorageError, open_backend};
