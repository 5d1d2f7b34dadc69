//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Row and column cursor
    /// Move the row cursor up. Default: k/↑
    RowUp,
    /// Move the row cursor down. Default: j/↓
    RowDown,
    /// Move the column cursor left. Default: h/←
    ColumnLeft,
    /// Move the column cursor right. Default: l/→
    ColumnRight,

    // Pagination
    /// Previous page. Default: p/Page Up
    PreviousPage,
    /// Next page. Default: n/Page Down
    NextPage,
    /// Jump to the first page. Default: g/Home
    FirstPage,
    /// Jump to the last page. Default: G/End
    LastPage,
    /// Prompt for a page number and jump to it. Default: :
    GoToPage,

    // Table interaction
    /// Cycle the sort of the column under the cursor. Default: s/Enter
    ToggleSort,
    /// Toggle selection of the row under the cursor. Default: Space
    ToggleRowSelection,
    /// Header checkbox: select or clear all filtered rows. Default: a
    ToggleAllSelection,
    /// Advance the type filter through the distinct types. Default: t
    CycleTypeFilter,
    /// Clear search text and type filter. Default: c
    ClearFilters,

    // Search
    /// Activate search input. Default: //Ctrl+f
    StartSearch,
    /// Apply the typed search text. Default: Enter
    SubmitSearch,
    /// Cancel search input. Default: Esc
    CancelSearch,

    // Export
    /// Write `table_data.csv`. Default: e
    ExportCsv,
    /// Write `table_data.xlsx`. Default: x
    ExportXlsx,

    // Navigation
    /// Next sidebar entry. Default: Tab
    NextView,
    /// Previous sidebar entry. Default: Shift+Tab
    PreviousView,
    /// Jump to a sidebar entry by 1-based number. Default: 1-3
    SelectView(usize),

    // Application
    /// Exit the application. Default: q/Ctrl+c
    Quit,
    /// Show help overlay with keyboard shortcuts. Default: ?
    Help,
    /// Refetch the report. Default: r
    Refresh,
}

impl KeyAction {
    /// Short description for the help overlay.
    pub fn description(self) -> &'static str {
        match self {
            KeyAction::RowUp => "Row up",
            KeyAction::RowDown => "Row down",
            KeyAction::ColumnLeft => "Column left",
            KeyAction::ColumnRight => "Column right",
            KeyAction::PreviousPage => "Previous page",
            KeyAction::NextPage => "Next page",
            KeyAction::FirstPage => "First page",
            KeyAction::LastPage => "Last page",
            KeyAction::GoToPage => "Go to page number",
            KeyAction::ToggleSort => "Sort by column",
            KeyAction::ToggleRowSelection => "Select row",
            KeyAction::ToggleAllSelection => "Select all rows",
            KeyAction::CycleTypeFilter => "Cycle type filter",
            KeyAction::ClearFilters => "Clear filters",
            KeyAction::StartSearch => "Search",
            KeyAction::SubmitSearch => "Apply search",
            KeyAction::CancelSearch => "Cancel search",
            KeyAction::ExportCsv => "Export CSV",
            KeyAction::ExportXlsx => "Export Excel",
            KeyAction::NextView => "Next view",
            KeyAction::PreviousView => "Previous view",
            KeyAction::SelectView(_) => "Go to view",
            KeyAction::Quit => "Quit",
            KeyAction::Help => "Toggle help",
            KeyAction::Refresh => "Reload report",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_view_carries_index() {
        match KeyAction::SelectView(2) {
            KeyAction::SelectView(n) => assert_eq!(n, 2),
            other => panic!("unexpected {other:?}"),
        }
        assert_ne!(KeyAction::SelectView(1), KeyAction::SelectView(2));
    }

    #[test]
    fn descriptions_are_not_empty() {
        for action in [
            KeyAction::RowUp,
            KeyAction::ToggleSort,
            KeyAction::ExportXlsx,
            KeyAction::GoToPage,
            KeyAction::SelectView(3),
            KeyAction::Refresh,
        ] {
            assert!(!action.description().is_empty());
        }
    }
}
