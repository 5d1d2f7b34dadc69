//! Table construction and export errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised when building a table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    /// Two columns share an identifier.
    #[error("Duplicate column id: {0}")]
    DuplicateColumn(String),

    /// A sort key names a column that does not exist.
    #[error("Unknown sort column: {0}")]
    UnknownSortColumn(String),
}

/// Errors raised while exporting the filtered row set.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Exports are disabled for this table.
    #[error("Exports are disabled for this table")]
    Disabled,

    /// CSV encoding failed.
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    /// Spreadsheet encoding failed.
    #[error("Spreadsheet encoding failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// Record set exceeds worksheet limits.
    #[error("Too much data for one worksheet: {rows} rows x {columns} columns")]
    TooLarge {
        /// Number of data rows.
        rows: usize,
        /// Number of columns.
        columns: usize,
    },

    /// Writing the artifact to disk failed.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
