use std::fmt;

/// Errors raised while parsing an uploaded tabular file.
///
/// All of these abort the import and leave the dataset unchanged; none of
/// them is allowed to propagate past the import boundary as anything other
/// than a user-visible message.
#[derive(Debug, Clone)]
pub enum ImportError {
    /// The file name does not end in a recognized extension.
    UnsupportedFormat(String),
    /// The file parsed but produced zero data rows.
    EmptyFile,
    /// The underlying codec rejected the content.
    Parse(String),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::UnsupportedFormat(name) => {
                write!(f, "unsupported file format: {name} (expected .csv or .xlsx)")
            }
            ImportError::EmptyFile => write!(f, "file contains no data rows"),
            ImportError::Parse(msg) => write!(f, "could not parse file: {msg}"),
        }
    }
}

impl std::error::Error for ImportError {}

/// Errors raised while producing an export byte stream.
#[derive(Debug, Clone)]
pub enum ExportError {
    Csv(String),
    Spreadsheet(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Csv(msg) => write!(f, "CSV export failed: {msg}"),
            ExportError::Spreadsheet(msg) => write!(f, "spreadsheet export failed: {msg}"),
        }
    }
}

impl std::error::Error for ExportError {}
