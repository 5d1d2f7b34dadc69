//! Dashboard styling.
//!
//! Every style collapses to the terminal default when colors are disabled.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// `--no-color` wins, then any `NO_COLOR` value; colors are on otherwise.
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var_os("NO_COLOR").is_none();
        Self { enabled }
    }

    /// Whether colored styles are used.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== DashboardStyles =====

/// Styles for the dashboard chrome and table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStyles {
    /// Top bar.
    pub header: Style,
    /// Sidebar entry of the current view.
    pub sidebar_active: Style,
    /// Table header row.
    pub table_header: Style,
    /// Header cell under the column cursor.
    pub column_cursor: Style,
    /// Row under the cursor.
    pub row_cursor: Style,
    /// Selected rows.
    pub selected_row: Style,
    /// Current page link.
    pub page_active: Style,
    /// Hints and disabled controls.
    pub muted: Style,
    /// Info status messages.
    pub info: Style,
    /// Errors and failed fetches.
    pub error: Style,
    /// Border of the focused pane.
    pub border_focused: Style,
}

impl DashboardStyles {
    /// Styles for the given color setting.
    pub fn with_color_config(config: ColorConfig) -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        if config.colors_enabled() {
            Self {
                header: Style::default().fg(Color::Cyan),
                sidebar_active: bold.fg(Color::Yellow),
                table_header: bold.fg(Color::White),
                column_cursor: bold.fg(Color::Black).bg(Color::Cyan),
                row_cursor: Style::default().bg(Color::DarkGray),
                selected_row: Style::default().fg(Color::Green),
                page_active: bold.fg(Color::Black).bg(Color::Yellow),
                muted: Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
                info: Style::default().fg(Color::Green),
                error: Style::default().fg(Color::Red),
                border_focused: Style::default().fg(Color::Cyan),
            }
        } else {
            Self {
                header: Style::default(),
                sidebar_active: bold,
                table_header: bold,
                column_cursor: Style::default().add_modifier(Modifier::REVERSED),
                row_cursor: Style::default().add_modifier(Modifier::REVERSED),
                selected_row: Style::default(),
                page_active: bold,
                muted: Style::default(),
                info: Style::default(),
                error: Style::default(),
                border_focused: Style::default(),
            }
        }
    }
}

impl Default for DashboardStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}

// ===== Tests =====
