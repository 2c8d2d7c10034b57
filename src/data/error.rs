//! Error types for data operations
//!
//! Provides unified error handling for loading, editing and saving tables.

use thiserror::Error;

// Re-export CSV limits from constants module for consistency
pub use crate::constants::{MAX_CSV_ROWS, MAX_CSV_SIZE_MB};

/// Errors that can occur during data operations
#[derive(Error, Debug)]
pub enum DataError {
    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error reported by the CSV reader/writer
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed table contents
    #[error("{0}")]
    Parse(String),

    /// File is too large for eager loading
    #[error("File too large: {size_mb}MB (max {max_mb}MB)")]
    TooLarge { size_mb: u64, max_mb: usize },

    /// Too many rows for eager loading
    #[error("Too many rows: {rows} (max {max_rows})")]
    TooManyRows { rows: usize, max_rows: usize },

    /// File has no header line
    #[error("No columns to parse from file")]
    EmptyFile,

    /// Two columns share a name
    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("Row index {index} out of bounds ({len} rows)")]
    RowOutOfBounds { index: usize, len: usize },

    #[error("Column index {index} out of bounds ({len} columns)")]
    ColumnOutOfBounds { index: usize, len: usize },

    /// Cell value rejected
    #[error("Invalid value: {0}")]
    Edit(String),

    /// Save requested without a destination path
    #[error("No file to save to")]
    NoFile,
}

/// Broad failure categories, used when reporting errors to the user
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    Index,
    Io,
    Edit,
}

impl DataError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DataError::Io(_) | DataError::NoFile => ErrorKind::Io,
            DataError::Csv(e) if e.is_io_error() => ErrorKind::Io,
            DataError::Csv(_)
            | DataError::Parse(_)
            | DataError::TooLarge { .. }
            | DataError::TooManyRows { .. }
            | DataError::EmptyFile
            | DataError::DuplicateColumn(_) => ErrorKind::Parse,
            DataError::RowOutOfBounds { .. } | DataError::ColumnOutOfBounds { .. } => {
                ErrorKind::Index
            }
            DataError::Edit(_) => ErrorKind::Edit,
        }
    }
}

/// Result type alias for data operations
pub type DataResult<T> = Result<T, DataError>;

impl From<String> for DataError {
    fn from(s: String) -> Self {
        DataError::Parse(s)
    }
}

impl From<&str> for DataError {
    fn from(s: &str) -> Self {
        DataError::Parse(s.to_string())
    }
}
