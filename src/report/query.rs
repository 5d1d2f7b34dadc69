//! Session-wide report query.
//!
//! The fetch runs on a background thread and hands its result back over a
//! channel that the event loop polls. One successful report is cached for the
//! whole session and shared by every view; `refresh` starts a new fetch and
//! keeps serving the previous report until it lands.

use super::client::ReportSource;
use super::error::FetchError;
use crate::model::Report;
use chrono::{DateTime, Local};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use tracing::{info, warn};

/// Tri-state of an asynchronous load, plus the not-yet-started state.
#[derive(Debug)]
pub enum FetchState<T> {
    /// No fetch started yet.
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last fetch succeeded.
    Success(T),
    /// The last fetch failed.
    Failure(FetchError),
}

impl<T> FetchState<T> {
    /// True while a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    /// Loaded value, if the last fetch succeeded.
    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Success(data) => Some(data),
            _ => None,
        }
    }

    /// Error of the last fetch, if it failed.
    pub fn error(&self) -> Option<&FetchError> {
        match self {
            FetchState::Failure(e) => Some(e),
            _ => None,
        }
    }
}

/// A successfully fetched report and when it arrived.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedReport {
    /// Decoded report.
    pub report: Report,
    /// Local time the fetch completed.
    pub fetched_at: DateTime<Local>,
}

type FetchResult = Result<Report, FetchError>;

/// Cached report query for one session.
pub struct ReportQuery {
    source: ReportSource,
    state: FetchState<Arc<LoadedReport>>,
    /// Last good report, kept only while a refresh is in flight.
    stale: Option<Arc<LoadedReport>>,
    pending: Option<Receiver<FetchResult>>,
    generation: u64,
}

impl ReportQuery {
    /// Query over `source`. Nothing is fetched until started.
    pub fn new(source: ReportSource) -> Self {
        Self {
            source,
            state: FetchState::Idle,
            stale: None,
            pending: None,
            generation: 0,
        }
    }

    /// Current fetch state.
    pub fn state(&self) -> &FetchState<Arc<LoadedReport>> {
        &self.state
    }

    /// Where reports are fetched from.
    pub fn source(&self) -> &ReportSource {
        &self.source
    }

    /// Shared handle to the cached report. During a refresh this is the
    /// report being replaced.
    pub fn data(&self) -> Option<Arc<LoadedReport>> {
        self.state.data().or(self.stale.as_ref()).cloned()
    }

    /// Increments every time a fetch completes, success or failure.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start the first fetch. No-op once a fetch has been started.
    pub fn ensure_started(&mut self) {
        if matches!(self.state, FetchState::Idle) {
            self.spawn();
        }
    }

    /// Discard the cache and refetch. No-op while a fetch is in flight.
    pub fn refresh(&mut self) {
        if self.state.is_loading() {
            return;
        }
        self.spawn();
    }

    fn spawn(&mut self) {
        let (tx, rx) = mpsc::channel();
        let source = self.source.clone();
        info!(source = %source.describe(), "Fetching report");

        let spawned = std::thread::Builder::new()
            .name("report-fetch".to_string())
            .spawn(move || {
                // Receiver may be gone if the app quit mid-fetch.
                let _ = tx.send(source.fetch());
            });

        match spawned {
            Ok(_) => {
                self.stale = self.state.data().cloned();
                self.state = FetchState::Loading;
                self.pending = Some(rx);
            }
            Err(e) => self.finish(Err(FetchError::Spawn(e))),
        }
    }

    /// Collect a finished fetch. Returns true if the state changed.
    pub fn poll(&mut self) -> bool {
        let Some(rx) = &self.pending else {
            return false;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => Err(FetchError::Disconnected),
        };
        self.pending = None;
        self.finish(result);
        true
    }

    /// Block until the current fetch finishes. Starts one if idle.
    pub fn wait(&mut self) -> &FetchState<Arc<LoadedReport>> {
        self.ensure_started();
        if let Some(rx) = self.pending.take() {
            let result = rx.recv().unwrap_or(Err(FetchError::Disconnected));
            self.finish(result);
        }
        &self.state
    }

    fn finish(&mut self, result: FetchResult) {
        self.generation += 1;
        self.stale = None;
        self.state = match result {
            Ok(report) => {
                info!(
                    campaigns = report.campaigns().len(),
                    "Report fetched"
                );
                FetchState::Success(Arc::new(LoadedReport {
                    report,
                    fetched_at: Local::now(),
                }))
            }
            Err(e) => {
                warn!(error = %e, "Report fetch failed");
                FetchState::Failure(e)
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{Duration, Instant};

    fn write_report(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("roidash-query-{}-{name}.json", std::process::id()));
        std::fs::write(&path, body).unwrap();
        path
    }

    fn poll_until_done(query: &mut ReportQuery) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while query.state().is_loading() && Instant::now() < deadline {
            query.poll();
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn starts_idle() {
        let query = ReportQuery::new(ReportSource::File(PathBuf::from("/nonexistent")));
        assert!(matches!(query.state(), FetchState::Idle));
        assert!(query.data().is_none());
    }

    #[test]
    fn background_fetch_reaches_success() {
        let path = write_report("ok", r#"{"report":{"campaigns":[{"name":"A"}]}}"#);
        let mut query = ReportQuery::new(ReportSource::File(path.clone()));
        query.ensure_started();
        assert!(query.state().is_loading());
        poll_until_done(&mut query);
        let data = query.data().unwrap();
        assert_eq!(data.report.campaigns().len(), 1);
        assert_eq!(query.generation(), 1);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn cached_report_is_shared() {
        let path = write_report("shared", r#"{"report":{"campaigns":[]}}"#);
        let mut query = ReportQuery::new(ReportSource::File(path.clone()));
        query.wait();
        query.ensure_started();
        assert_eq!(query.generation(), 1, "second start must not refetch");
        let a = query.data().unwrap();
        let b = query.data().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn refresh_refetches() {
        let path = write_report("refresh", r#"{"report":{"campaigns":[]}}"#);
        let mut query = ReportQuery::new(ReportSource::File(path.clone()));
        query.wait();
        std::fs::write(&path, r#"{"report":{"campaigns":[{"name":"new"}]}}"#).unwrap();
        query.refresh();
        query.wait();
        assert_eq!(query.generation(), 2);
        assert_eq!(query.data().unwrap().report.campaigns().len(), 1);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn refresh_serves_previous_report_until_done() {
        let path = write_report("stale", r#"{"report":{"campaigns":[{"name":"old"}]}}"#);
        let mut query = ReportQuery::new(ReportSource::File(path.clone()));
        query.wait();
        let before = query.data().unwrap();

        std::fs::write(&path, "not json").unwrap();
        query.refresh();
        assert!(query.state().is_loading());
        assert!(Arc::ptr_eq(&query.data().unwrap(), &before));
        assert_eq!(query.generation(), 1);

        // A failed refresh does not fall back to the old report.
        query.wait();
        assert!(query.state().error().is_some());
        assert!(query.data().is_none());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn missing_file_is_a_failure() {
        let mut query = ReportQuery::new(ReportSource::File(PathBuf::from(
            "/nonexistent/roidash/report.json",
        )));
        let state = query.wait();
        assert!(matches!(state.error(), Some(FetchError::File { .. })));
    }

    #[test]
    fn malformed_json_is_a_decode_failure() {
        let path = write_report("bad", "not json");
        let mut query = ReportQuery::new(ReportSource::File(path.clone()));
        assert!(matches!(query.wait().error(), Some(FetchError::Decode(_))));
        let _ = std::fs::remove_file(path);
    }
}
