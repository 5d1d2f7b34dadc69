//! UI state machine (pure).
//!
//! All state transitions are testable without a terminal.

pub mod app_state;
pub mod search;
pub mod search_input_handler;

pub use app_state::{AppState, PageContent, StatusLevel, StatusMessage, TableCursor};
pub use search::SearchState;
