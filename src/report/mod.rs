//! Campaign report loading.

pub mod client;
pub mod error;
pub mod query;

pub use client::{ReportClient, ReportSource};
pub use error::FetchError;
pub use query::{FetchState, LoadedReport, ReportQuery};

#[cfg(test)]
#[path = "http_tests.rs"]
mod http_tests;
