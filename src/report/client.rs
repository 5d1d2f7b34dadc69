//! Report sources: the HTTP endpoint or a local JSON file.

use super::error::FetchError;
use crate::model::Report;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Blocking HTTP client for the report endpoint.
#[derive(Debug, Clone)]
pub struct ReportClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl ReportClient {
    /// Build a client. `timeout` of `None` waits indefinitely.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, FetchError> {
        let http = reqwest::blocking::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_key,
        })
    }

    /// URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// GET the report. Any non-2xx status is an error before decoding.
    pub fn fetch(&self) -> Result<Report, FetchError> {
        let mut request = self.http.get(&self.endpoint);
        if let Some(key) = &self.api_key {
            request = request.query(&[("api_key", key.as_str())]);
        }

        let response = request.send()?;
        let status = response.status();
        debug!(status = %status, endpoint = %self.endpoint, "Report response received");
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes()?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Where the report comes from.
#[derive(Debug, Clone)]
pub enum ReportSource {
    /// Fetch over HTTP.
    Http(ReportClient),
    /// Read a JSON report from disk.
    File(PathBuf),
}

impl ReportSource {
    /// Load the report once, blocking the calling thread.
    pub fn fetch(&self) -> Result<Report, FetchError> {
        match self {
            ReportSource::Http(client) => client.fetch(),
            ReportSource::File(path) => {
                let bytes = std::fs::read(path).map_err(|source| FetchError::File {
                    path: path.clone(),
                    source,
                })?;
                Ok(serde_json::from_slice(&bytes)?)
            }
        }
    }

    /// Human-readable origin for logs and the header.
    pub fn describe(&self) -> String {
        match self {
            ReportSource::Http(client) => client.endpoint().to_string(),
            ReportSource::File(path) => path.display().to_string(),
        }
    }
}
