//! Tests for dashboard layout rendering.

use super::*;
use crate::model::KeyAction;
use crate::pages::PageSettings;
use crate::report::{ReportQuery, ReportSource};
use crate::route::View;
use crate::state::StatusMessage;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;
use std::path::PathBuf;

// ===== Test Helpers =====

const REPORT: &str = r#"{"report":{"campaigns":[
    {"name":"Spring Sale","channel":"Clicks Network","type":"Paid","spend":12500,
     "metrics":{"impressions":5000,"clicks":250,"conversions":10,"roi":1.5}},
    {"name":"Newsletter","channel":"Email","type":"Owned","spend":100}
]}}"#;

fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();
    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

fn report_file(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "roidash-layout-{}-{name}.json",
        std::process::id()
    ));
    std::fs::write(&path, REPORT).unwrap();
    path
}

fn loaded_state(name: &str, view: View) -> AppState {
    let path = report_file(name);
    let query = ReportQuery::new(ReportSource::File(path.clone()));
    let mut state = AppState::new(view, PageSettings::default(), query);
    state.wait_for_report();
    let _ = std::fs::remove_file(path);
    state
}

fn render(state: &AppState, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    let styles = DashboardStyles::default();
    let bindings = KeyBindings::default();
    terminal
        .draw(|frame| render_layout(frame, state, &styles, &bindings))
        .unwrap();
    buffer_to_string(terminal.backend().buffer())
}

// ===== Loading and errors =====

#[test]
fn loading_page_shows_placeholder() {
    let query = ReportQuery::new(ReportSource::File(PathBuf::from("/unused")));
    let state = AppState::new(View::RoiTracker, PageSettings::default(), query);
    let output = render(&state, 100, 12);
    assert!(output.contains("Data Loading"));
    assert!(output.lines().next().unwrap().contains("Loading..."));
}

#[test]
fn failed_fetch_shows_error_message() {
    let query = ReportQuery::new(ReportSource::File(PathBuf::from(
        "/nonexistent/roidash/missing.json",
    )));
    let mut state = AppState::new(View::RoiTracker, PageSettings::default(), query);
    state.wait_for_report();
    let output = render(&state, 120, 12);
    assert!(output.contains("Failed to read report file"));
    assert!(output.lines().next().unwrap().contains("Fetch failed"));
}

// ===== Chrome =====

#[test]
fn header_shows_workspace_when_configured() {
    let mut state = loaded_state("workspace", View::RoiTracker);
    assert!(!header_text(&state).contains("Workspace"));
    state.workspace_id = Some("ws-42".to_string());
    let header = header_text(&state);
    assert!(header.starts_with("roidash | Workspace: ws-42 | Updated "));
}

#[test]
fn sidebar_and_title_follow_view() {
    let state = loaded_state("sidebar", View::PerformanceTracker);
    let output = render(&state, 140, 14);
    assert!(output.contains("▶ 2 Performance Tracker"));
    assert!(output.contains(" Performance Tracker "));
}

#[test]
fn type_filter_shows_in_title_where_enabled() {
    let mut state = loaded_state("title", View::MarketingRoi);
    assert_eq!(page_title(&state), " Marketing ROI | Type: All ");
    state.apply_action(KeyAction::CycleTypeFilter);
    assert_eq!(page_title(&state), " Marketing ROI | Type: Paid ");

    state.navigate(View::RoiTracker);
    assert_eq!(page_title(&state), " ROI Tracker ");
}

#[test]
fn status_bar_prefers_messages_over_hints() {
    let mut state = loaded_state("status", View::RoiTracker);
    assert!(status_text(&state).starts_with("q: quit"));

    state.apply_action(KeyAction::StartSearch);
    assert!(status_text(&state).starts_with("Type to filter"));

    state.status = Some(StatusMessage::error("Export failed: disk full"));
    assert!(status_text(&state).ends_with("] Export failed: disk full"));
}

#[test]
fn page_prompt_replaces_status_bar() {
    let mut state = loaded_state("prompt", View::RoiTracker);
    state.apply_action(KeyAction::GoToPage);
    state.push_page_digit('1');
    assert_eq!(
        status_text(&state),
        "Go to page (1-1): 1_ | Enter: jump | Esc: cancel"
    );

    state.cancel_page_prompt();
    assert!(status_text(&state).starts_with("q: quit"));
}

#[test]
fn opened_with_type_filter_shows_it_in_title() {
    let path = report_file("title-initial");
    let query = ReportQuery::new(ReportSource::File(path.clone()));
    let mut state = AppState::new(View::RoiTracker, PageSettings::default(), query)
        .with_initial_filter(crate::table::FilterInput::new("", Some("Paid".to_string())));
    state.wait_for_report();
    let _ = std::fs::remove_file(path);

    assert_eq!(page_title(&state), " ROI Tracker | Type: Paid ");
}

// ===== Table page =====

#[test]
fn table_page_renders_rows_and_footer() {
    let state = loaded_state("table", View::RoiTracker);
    let output = render(&state, 240, 14);
    assert!(output.contains("Campaign Name ▲"));
    assert!(output.contains("Spring Sale"));
    assert!(output.contains("$12,500"));
    assert!(output.contains("Showing 1 to 2 of 2 results"));
    assert!(output.contains("‹ [1] ›"));
}

#[test]
fn missing_metrics_render_dashes() {
    let state = loaded_state("dashes", View::RoiTracker);
    let output = render(&state, 240, 14);
    let newsletter = output
        .lines()
        .find(|l| l.contains("Newsletter"))
        .unwrap();
    assert!(newsletter.contains('-'));
}

#[test]
fn search_box_appears_while_searching() {
    let mut state = loaded_state("search", View::RoiTracker);
    state.apply_action(KeyAction::StartSearch);
    state.update_search(|s| crate::state::search_input_handler::handle_char_input(s, 'e'));
    let output = render(&state, 240, 16);
    assert!(output.contains("Search"));
    assert!(output.contains("Showing 1 to 2 of 2 results"));
}

#[test]
fn help_overlay_draws_over_page() {
    let mut state = loaded_state("help", View::RoiTracker);
    state.apply_action(KeyAction::Help);
    let output = render(&state, 120, 40);
    assert!(output.contains("Keyboard Shortcuts"));
}
