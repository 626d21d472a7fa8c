use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Maximum log file size before rotation (5 MB)
const MAX_LOG_SIZE: u64 = 5 * 1024 * 1024;

/// Move an oversized log aside so the fresh file starts empty. One
/// generation of history is kept as `kassabok.log.old`.
fn rotate_if_oversized(log_path: &Path) -> io::Result<()> {
    match fs::metadata(log_path) {
        Ok(metadata) if metadata.len() > MAX_LOG_SIZE => {
            let mut old = log_path.as_os_str().to_os_string();
            old.push(".old");
            fs::rename(log_path, old)
        }
        _ => Ok(()),
    }
}

/// Initialize logging to a file in the data directory.
///
/// Logs go to `{data_dir}/kassabok.log`; when the file exceeds 5MB it is
/// rotated aside and a fresh one started. The level comes from the `level`
/// parameter unless `RUST_LOG` overrides it.
pub fn init_logging(data_dir: &Path, level: &str) -> color_eyre::Result<()> {
    fs::create_dir_all(data_dir)?;

    let log_path = data_dir.join("kassabok.log");
    if let Err(e) = rotate_if_oversized(&log_path) {
        eprintln!("Warning: failed to rotate log file: {e}");
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let default_filter = format!("kassabok={level},kassabok_core=warn");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    tracing::debug!("logging initialized (log_path={})", log_path.display());
    Ok(())
}
