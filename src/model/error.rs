//! Error types for the roidash application.
//!
//! Each layer owns its error enum; [`AppError`] wraps them so the entry point
//! can propagate any failure with `?`.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error
//!   - [`ConfigError`] - Invalid config path or TOML
//!   - [`LoggingError`] - Log file could not be opened
//!   - [`FetchError`] - Report request or decode failure
//!   - [`TableError`] - Invalid column or sort definitions
//!   - [`ExportError`] - CSV/spreadsheet encoding or write failure
//!   - [`TuiError`] - Terminal setup or rendering failure
//!
//! # Recovery Strategy
//!
//! Fetch and export failures are **non-fatal** inside the TUI: the page shows
//! the fetch error text, and export errors go to the status bar. In headless
//! export mode every error is fatal and reaches `main`.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::report::FetchError;
use crate::table::{ExportError, TableError};
use crate::view::TuiError;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
///
/// # Examples
///
/// ```
/// use roidash::model::error::AppError;
/// use roidash::table::TableError;
///
/// let err: AppError = TableError::DuplicateColumn("name".to_string()).into();
/// assert!(err.to_string().contains("Duplicate column id: name"));
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// The report could not be fetched or decoded.
    ///
    /// Rendered verbatim on the page in the TUI; the message of a non-2xx
    /// response is "Network response was not ok".
    #[error("{0}")]
    Fetch(#[from] FetchError),

    /// A page declared invalid columns or sort keys.
    #[error("Table error: {0}")]
    Table(#[from] TableError),

    /// Export failed.
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    /// Terminal or TUI rendering error.
    ///
    /// Fatal: without a working terminal the dashboard cannot function.
    #[error("Terminal error: {0}")]
    Tui(#[from] TuiError),
}
