//! Help overlay widget displaying keyboard shortcuts.
//!
//! Shows a centered modal listing every bound action grouped by category.
//! Key labels come from the active [`KeyBindings`], so the overlay never
//! drifts from the real bindings. Toggled by '?', dismissed by 'Esc' or '?'.

use super::constants::{HELP_POPUP_HEIGHT_PERCENT, HELP_POPUP_WIDTH_PERCENT};
use crate::config::KeyBindings;
use crate::model::KeyAction;
use crate::view::styles::DashboardStyles;
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Width of the key column, in cells.
const KEY_COLUMN_WIDTH: usize = 16;

const GROUPS: &[(&str, &[KeyAction])] = &[
    (
        "Table",
        &[
            KeyAction::RowUp,
            KeyAction::RowDown,
            KeyAction::ColumnLeft,
            KeyAction::ColumnRight,
            KeyAction::ToggleSort,
            KeyAction::ToggleRowSelection,
            KeyAction::ToggleAllSelection,
        ],
    ),
    (
        "Pages",
        &[
            KeyAction::PreviousPage,
            KeyAction::NextPage,
            KeyAction::FirstPage,
            KeyAction::LastPage,
            KeyAction::GoToPage,
        ],
    ),
    (
        "Search and Filters",
        &[
            KeyAction::StartSearch,
            KeyAction::CancelSearch,
            KeyAction::CycleTypeFilter,
            KeyAction::ClearFilters,
        ],
    ),
    ("Export", &[KeyAction::ExportCsv, KeyAction::ExportXlsx]),
    (
        "Views",
        &[
            KeyAction::NextView,
            KeyAction::PreviousView,
            KeyAction::SelectView(1),
        ],
    ),
    (
        "Application",
        &[KeyAction::Refresh, KeyAction::Help, KeyAction::Quit],
    ),
];

/// Render the help overlay centered on the screen.
pub fn render_help_overlay(frame: &mut Frame, bindings: &KeyBindings, styles: &DashboardStyles) {
    let popup_area = centered_rect(
        HELP_POPUP_WIDTH_PERCENT,
        HELP_POPUP_HEIGHT_PERCENT,
        frame.area(),
    );
    frame.render_widget(Clear, popup_area);

    let help = Paragraph::new(build_help_content(bindings, styles))
        .block(
            Block::default()
                .title(" Keyboard Shortcuts ")
                .borders(Borders::ALL)
                .border_style(styles.border_focused),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Left);
    frame.render_widget(help, popup_area);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(1),
        width: popup_area.width,
        height: 1,
    };
    let hint = Paragraph::new(Line::from(Span::styled(
        " Press Esc or ? to close ",
        styles.muted.add_modifier(Modifier::DIM),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(hint, hint_area);
}

/// Centered rect covering the given percentages of `area`.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = area.height * percent_y / 100;
    Rect {
        x: area.x + area.width.saturating_sub(popup_width) / 2,
        y: area.y + area.height.saturating_sub(popup_height) / 2,
        width: popup_width,
        height: popup_height,
    }
}

/// Keys shown for `action`. View selection lists every number key.
fn key_label(bindings: &KeyBindings, action: KeyAction) -> String {
    let keys: Vec<String> = match action {
        KeyAction::SelectView(_) => (1..=crate::route::View::ALL.len())
            .flat_map(|n| bindings.keys_for(KeyAction::SelectView(n)))
            .collect(),
        other => bindings.keys_for(other),
    };
    keys.join(", ")
}

/// Pad `keys` to the key column by display width, not char count.
fn pad_keys(keys: &str) -> String {
    let padding = KEY_COLUMN_WIDTH.saturating_sub(keys.width());
    format!("  {keys}{}", " ".repeat(padding))
}

fn shortcut_line(keys: String, description: &str, styles: &DashboardStyles) -> Line<'static> {
    Line::from(vec![
        Span::styled(pad_keys(&keys), styles.sidebar_active),
        Span::raw(description.to_string()),
    ])
}

/// Help lines grouped by category. Actions without bindings are omitted.
pub fn build_help_content(bindings: &KeyBindings, styles: &DashboardStyles) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, (title, actions)) in GROUPS.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(*title, styles.table_header)));
        for &action in *actions {
            let keys = key_label(bindings, action);
            if keys.is_empty() {
                continue;
            }
            lines.push(shortcut_line(keys, action.description(), styles));
        }
        if *title == "Search and Filters" {
            lines.push(shortcut_line(
                "Enter".to_string(),
                "Apply search (while typing)",
                styles,
            ));
        }
    }
    lines
}

// ===== Tests =====
