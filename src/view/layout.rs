//! Dashboard layout rendering.
//!
//! Header bar on top, sidebar on the left, the current page on the right and
//! a status bar at the bottom. The help overlay draws over everything.

use crate::config::KeyBindings;
use crate::report::FetchState;
use crate::state::{AppState, PageContent, SearchState, StatusLevel};
use crate::view::constants::{
    HEADER_HEIGHT, PAGINATION_HEIGHT, SEARCH_INPUT_HEIGHT, SIDEBAR_WIDTH, STATUS_BAR_HEIGHT,
};
use crate::view::styles::DashboardStyles;
use crate::view::{help, pagination, sidebar, table, SearchInput};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Draw the whole dashboard for one frame.
pub fn render_layout(
    frame: &mut Frame,
    state: &AppState,
    styles: &DashboardStyles,
    bindings: &KeyBindings,
) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(frame.area());

    render_header(frame, vertical[0], state, styles);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(vertical[1]);

    sidebar::render_sidebar(frame, horizontal[0], state.view(), styles);
    render_page(frame, horizontal[1], state, styles);
    render_status_bar(frame, vertical[2], state, styles);

    if state.help_visible {
        help::render_help_overlay(frame, bindings, styles);
    }
}

/// Header text: app name, workspace and report freshness.
pub fn header_text(state: &AppState) -> String {
    let mut parts = vec!["roidash".to_string()];
    if let Some(workspace) = &state.workspace_id {
        parts.push(format!("Workspace: {workspace}"));
    }
    let freshness = if state.is_refreshing() {
        "Refreshing...".to_string()
    } else {
        match state.query().state() {
            FetchState::Idle | FetchState::Loading => "Loading...".to_string(),
            FetchState::Failure(_) => "Fetch failed".to_string(),
            FetchState::Success(loaded) => {
                format!("Updated {}", loaded.fetched_at.format(TIME_FORMAT))
            }
        }
    };
    parts.push(freshness);
    parts.join(" | ")
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState, styles: &DashboardStyles) {
    frame.render_widget(
        Paragraph::new(Line::from(header_text(state))).style(styles.header),
        area,
    );
}

/// Page block title: view name plus the type filter on pages that offer it
/// or that were opened with one.
pub fn page_title(state: &AppState) -> String {
    let title = state.view().title();
    match state.table() {
        Some(table) if state.type_filter_enabled() || table.filter().type_filter.is_some() => {
            let filter = table.filter().type_filter.as_deref().unwrap_or("All");
            format!(" {title} | Type: {filter} ")
        }
        _ => format!(" {title} "),
    }
}

fn render_page(frame: &mut Frame, area: Rect, state: &AppState, styles: &DashboardStyles) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles.border_focused)
        .title(page_title(state));

    let table = match state.content() {
        PageContent::Table(table) => table,
        PageContent::Loading => {
            frame.render_widget(Paragraph::new("Data Loading").block(block), area);
            return;
        }
        PageContent::Failed(err) => {
            frame.render_widget(
                Paragraph::new(err.to_string())
                    .style(styles.error)
                    .wrap(Wrap { trim: false })
                    .block(block),
                area,
            );
            return;
        }
        PageContent::Broken(err) => {
            frame.render_widget(
                Paragraph::new(err.to_string()).style(styles.error).block(block),
                area,
            );
            return;
        }
    };

    let search_height = match state.search {
        SearchState::Inactive => 0,
        _ => SEARCH_INPUT_HEIGHT,
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(search_height),
            Constraint::Min(0),
            Constraint::Length(PAGINATION_HEIGHT),
        ])
        .split(area);

    if search_height > 0 {
        frame.render_widget(
            SearchInput::new(&state.search).border_style(styles.border_focused),
            chunks[0],
        );
    }
    table::render_table(frame, chunks[1], table, state.cursor, block, styles);
    pagination::render_pagination(frame, chunks[2], table, styles);
}

/// Status bar text: the latest message, or key hints when there is none.
pub fn status_text(state: &AppState) -> String {
    if let Some(digits) = &state.page_prompt {
        let total = state.table().map_or(0, |t| t.total_pages());
        return format!("Go to page (1-{total}): {digits}_ | Enter: jump | Esc: cancel");
    }
    match &state.status {
        Some(message) => format!("[{}] {}", message.at.format("%H:%M:%S"), message.text),
        None if state.search.is_typing() => {
            "Type to filter | Enter: apply | Esc: cancel".to_string()
        }
        None => "q: quit | ?: help | /: search | Tab: next view | e/x: export".to_string(),
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, styles: &DashboardStyles) {
    let style = match state.status.as_ref().map(|m| m.level) {
        Some(StatusLevel::Error) => styles.error,
        Some(StatusLevel::Info) => styles.info,
        None => styles.muted,
    };
    frame.render_widget(Paragraph::new(status_text(state)).style(style), area);
}

// ===== Tests =====

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
