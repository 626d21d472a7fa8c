//! Application configuration
//!
//! One YAML file, `config.yaml`, in the data directory. A missing file is
//! not an error: everything has a default, so a fresh install runs against
//! the local file backend out of the box. Saves go through the same
//! write-then-rename staging as the data file itself.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::io::atomic_write_bytes;

/// Errors raised loading or saving the config file.
#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    Parse(String),
    Serialize(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "IO error: {msg}"),
            ConfigError::Parse(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::Serialize(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Remote sheet backend settings: which worksheet of which document, where
/// the values API lives and the credential presented to it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SheetConfig {
    #[serde(default = "default_sheet_base_url")]
    pub base_url: String,
    #[serde(default = "default_document")]
    pub document: String,
    #[serde(default = "default_worksheet")]
    pub worksheet: String,
    /// Bearer token for the values API. Empty means unauthenticated.
    #[serde(default)]
    pub api_token: String,
}

impl Default for SheetConfig {
    fn default() -> Self {
        SheetConfig {
            base_url: default_sheet_base_url(),
            document: default_document(),
            worksheet: default_worksheet(),
            api_token: String::new(),
        }
    }
}

/// Cache time-to-live tiers, in seconds. The medium tier guards the dataset
/// cache; the long tier guards exchange-rate lookups.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CacheTtl {
    #[serde(default = "default_ttl_short")]
    pub short_secs: u64,
    #[serde(default = "default_ttl_medium")]
    pub medium_secs: u64,
    #[serde(default = "default_ttl_long")]
    pub long_secs: u64,
}

impl Default for CacheTtl {
    fn default() -> Self {
        CacheTtl {
            short_secs: default_ttl_short(),
            medium_secs: default_ttl_medium(),
            long_secs: default_ttl_long(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Backend selector: remote sheet when true, local file otherwise.
    #[serde(default)]
    pub use_remote_sheet: bool,
    #[serde(default)]
    pub sheet: SheetConfig,
    /// Local backend file, resolved against the data directory when
    /// relative.
    #[serde(default = "default_local_file")]
    pub local_file: PathBuf,
    #[serde(default = "default_currency")]
    pub default_currency: String,
    #[serde(default = "default_supported_currencies")]
    pub supported_currencies: Vec<String>,
    /// Base URL of the exchange-rate service.
    #[serde(default = "default_rates_url")]
    pub rates_url: String,
    #[serde(default)]
    pub cache_ttl: CacheTtl,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            use_remote_sheet: false,
            sheet: SheetConfig::default(),
            local_file: default_local_file(),
            default_currency: default_currency(),
            supported_currencies: default_supported_currencies(),
            rates_url: default_rates_url(),
            cache_ttl: CacheTtl::default(),
        }
    }
}

fn default_sheet_base_url() -> String {
    "https://sheets.example.com/api".to_string()
}

fn default_document() -> String {
    "ExpenseTracker".to_string()
}

fn default_worksheet() -> String {
    "Transactions".to_string()
}

fn default_local_file() -> PathBuf {
    PathBuf::from("expenses_local.csv")
}

fn default_currency() -> String {
    "SEK".to_string()
}

fn default_supported_currencies() -> Vec<String> {
    ["SEK", "INR", "USD", "EUR"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_rates_url() -> String {
    "https://api.exchangerate.host".to_string()
}

fn default_ttl_short() -> u64 {
    60
}

fn default_ttl_medium() -> u64 {
    300
}

fn default_ttl_long() -> u64 {
    3600
}

impl AppConfig {
    pub fn config_path(data_dir: &Path) -> PathBuf {
        data_dir.join("config.yaml")
    }

    /// Load from the data directory; a missing file yields the defaults.
    pub fn load_or_default(data_dir: &Path) -> Result<AppConfig, ConfigError> {
        let path = Self::config_path(data_dir);
        if !path.exists() {
            return Ok(AppConfig::default());
        }
        let content = fs::read_to_string(&path)
            .map_err(|e| ConfigError::Io(format!("failed to read {}: {e}", path.display())))?;
        serde_saphyr::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("failed to parse {}: {e}", path.display())))
    }

    pub fn save(&self, data_dir: &Path) -> Result<(), ConfigError> {
        let yaml = serde_saphyr::to_string(self)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;
        fs::create_dir_all(data_dir)
            .map_err(|e| ConfigError::Io(format!("failed to create data directory: {e}")))?;
        atomic_write_bytes(&Self::config_path(data_dir), yaml.as_bytes())
            .map_err(|e| ConfigError::Io(format!("failed to write config: {e}")))
    }

    /// The local backend file, absolute.
    pub fn local_file_path(&self, data_dir: &Path) -> PathBuf {
        if self.local_file.is_absolute() {
            self.local_file.clone()
        } else {
            data_dir.join(&self.local_file)
        }
    }
}
