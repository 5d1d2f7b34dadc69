//! Report fetch errors.

use std::path::PathBuf;

/// Errors that can occur while loading the campaign report.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Non-2xx HTTP response.
    #[error("Network response was not ok")]
    Status(reqwest::StatusCode),

    /// Network error during the request.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body is not a report document.
    #[error("Invalid report data: {0}")]
    Decode(#[from] serde_json::Error),

    /// Local report file could not be read.
    #[error("Failed to read report file {path}: {source}")]
    File {
        /// Report file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The background fetch thread could not be started.
    #[error("Failed to start report fetch: {0}")]
    Spawn(#[source] std::io::Error),

    /// The background fetch thread exited without a result.
    #[error("Report fetch was interrupted")]
    Disconnected,
}

impl FetchError {
    /// HTTP status of a rejected response, if any.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            FetchError::Status(status) => Some(*status),
            FetchError::Network(e) => e.status(),
            _ => None,
        }
    }
}
