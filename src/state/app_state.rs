//! Application state and transitions.
//!
//! AppState is the root state type containing all UI state. Key actions are
//! applied here so every transition is testable without a terminal.

use crate::model::{Campaign, KeyAction};
use crate::pages::{Page, PageSettings};
use crate::report::{FetchError, FetchState, LoadedReport, ReportQuery};
use crate::route::View;
use crate::state::{search_input_handler, SearchState};
use crate::table::{DataTable, ExportFormat, FilterInput, TableError};
use chrono::{DateTime, Local};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Longest page number the go-to-page prompt accepts.
const MAX_PAGE_DIGITS: usize = 6;

// ===== StatusMessage =====

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    /// Confirmation or progress.
    Info,
    /// Failed action.
    Error,
}

/// One-line feedback shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    /// Message text.
    pub text: String,
    /// Severity, which picks the style.
    pub level: StatusLevel,
    /// When the message was raised.
    pub at: DateTime<Local>,
}

impl StatusMessage {
    /// Informational message stamped now.
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Info,
            at: Local::now(),
        }
    }

    /// Error message stamped now.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Error,
            at: Local::now(),
        }
    }
}

// ===== TableCursor =====

/// Row and column under the cursor, relative to the current page.
///
/// `column` indexes data columns; the selection checkbox is not a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCursor {
    /// Row on the current page.
    pub row: usize,
    /// Data column index.
    pub column: usize,
}

// ===== PageContent =====

/// What the content pane shows for the current view.
pub enum PageContent<'a> {
    /// No report yet.
    Loading,
    /// The fetch failed; the message is shown as plain text.
    Failed(&'a FetchError),
    /// The page's column or sort definitions are invalid.
    Broken(&'a TableError),
    /// The mounted table.
    Table(&'a DataTable<Campaign>),
}

// ===== AppState =====

/// Root UI state.
///
/// # State Transitions
///
/// - View: any → any via sidebar keys. Switching unmounts the table and
///   mounts the new page over the cached report.
/// - Report: Idle → Loading → Success | Failure; refresh re-enters Loading
///   while the previous table stays visible.
/// - Search: Inactive → Typing → Active → Inactive. The table filter follows
///   the search text on every keystroke.
/// - Page prompt: closed → open (digits typed) → closed on Enter or Esc.
pub struct AppState {
    view: View,
    settings: PageSettings,
    query: ReportQuery,

    /// Table for `view`, present once the report has loaded.
    table: Option<DataTable<Campaign>>,
    /// Query generation `table` was built from.
    mounted_generation: Option<u64>,
    type_filter_enabled: bool,
    page_error: Option<TableError>,
    /// Type filter requested on the command line, applied at the first mount.
    pending_type_filter: Option<String>,

    /// Cursor position in the table.
    pub cursor: TableCursor,
    /// Search box state.
    pub search: SearchState,
    /// Help overlay is shown.
    pub help_visible: bool,
    /// Digits typed into the go-to-page prompt, `None` when it is closed.
    pub page_prompt: Option<String>,
    /// Latest status bar message.
    pub status: Option<StatusMessage>,
    /// Shown in the header when configured.
    pub workspace_id: Option<String>,
    /// Directory exports are written to.
    pub export_dir: PathBuf,
}

impl AppState {
    /// State for `view` over `query`. No table until the report loads.
    pub fn new(view: View, settings: PageSettings, query: ReportQuery) -> Self {
        Self {
            view,
            settings,
            query,
            table: None,
            mounted_generation: None,
            type_filter_enabled: false,
            page_error: None,
            pending_type_filter: None,
            cursor: TableCursor::default(),
            search: SearchState::Inactive,
            help_visible: false,
            page_prompt: None,
            status: None,
            workspace_id: None,
            export_dir: PathBuf::from("."),
        }
    }

    /// Start with a search and type filter already applied.
    pub fn with_initial_filter(mut self, filter: FilterInput) -> Self {
        if !filter.search.trim().is_empty() {
            self.search = SearchState::Active {
                query: filter.search,
            };
        }
        self.pending_type_filter = filter.type_filter;
        self
    }

    // ===== Accessors =====

    /// Current view.
    pub fn view(&self) -> View {
        self.view
    }

    /// Settings every page mounts with.
    pub fn settings(&self) -> &PageSettings {
        &self.settings
    }

    /// Session report query.
    pub fn query(&self) -> &ReportQuery {
        &self.query
    }

    /// Cached report, if one has loaded.
    pub fn report(&self) -> Option<Arc<LoadedReport>> {
        self.query.data()
    }

    /// Mounted table for the current view.
    pub fn table(&self) -> Option<&DataTable<Campaign>> {
        self.table.as_ref()
    }

    /// Mutable access to the mounted table.
    pub fn table_mut(&mut self) -> Option<&mut DataTable<Campaign>> {
        self.table.as_mut()
    }

    /// Whether the current page lets the user cycle the type filter.
    pub fn type_filter_enabled(&self) -> bool {
        self.type_filter_enabled
    }

    /// A refetch is running while the previous table stays visible.
    pub fn is_refreshing(&self) -> bool {
        self.query.state().is_loading() && self.table.is_some()
    }

    /// What the content pane should show.
    pub fn content(&self) -> PageContent<'_> {
        if let Some(err) = &self.page_error {
            return PageContent::Broken(err);
        }
        if let Some(table) = &self.table {
            return PageContent::Table(table);
        }
        match self.query.state() {
            FetchState::Failure(err) => PageContent::Failed(err),
            _ => PageContent::Loading,
        }
    }

    // ===== Report lifecycle =====

    /// Start the fetch if needed and collect a finished one.
    ///
    /// Returns true if anything visible changed.
    pub fn tick(&mut self) -> bool {
        let started = matches!(self.query.state(), FetchState::Idle);
        self.query.ensure_started();
        let finished = self.query.poll();
        if finished {
            self.sync_table();
        }
        started || finished
    }

    /// Block until the report is loaded (or failed) and mount the table.
    pub fn wait_for_report(&mut self) {
        self.query.wait();
        self.sync_table();
    }

    /// Bring the mounted table in line with the latest fetch result.
    pub fn sync_table(&mut self) {
        let generation = self.query.generation();
        if self.mounted_generation == Some(generation) {
            return;
        }
        match self.query.state() {
            FetchState::Failure(_) => {
                self.table = None;
                self.mounted_generation = Some(generation);
            }
            // While refreshing, `data` still holds the previous report.
            FetchState::Success(_) | FetchState::Loading | FetchState::Idle => {
                if let Some(loaded) = self.query.data() {
                    let rows = loaded.report.campaigns().to_vec();
                    match self.table.as_mut() {
                        Some(table) => table.set_rows(rows),
                        None => self.mount(rows),
                    }
                    self.mounted_generation = Some(generation);
                }
            }
        }
        self.clamp_cursor();
    }

    fn mount(&mut self, rows: Vec<Campaign>) {
        let mounted = Page::for_view(self.view, &self.settings).and_then(|page| {
            self.type_filter_enabled = page.type_filter;
            page.mount(rows)
        });
        let mut table = match mounted {
            Ok(table) => table,
            Err(err) => {
                warn!(view = %self.view, error = %err, "Page failed to mount");
                self.page_error = Some(err);
                return;
            }
        };

        let view = self.view;
        table.on_selection_change(move |selected: &[&Campaign]| {
            let names: Vec<&str> = selected.iter().filter_map(|c| c.name.as_deref()).collect();
            info!(view = %view, count = selected.len(), names = ?names, "Selection changed");
        });
        table.set_search(self.search.text());
        // A type filter from the command line applies on whichever page mounts first.
        if let Some(type_filter) = self.pending_type_filter.take() {
            table.set_type_filter(Some(type_filter));
        }
        self.table = Some(table);
    }

    // ===== Navigation =====

    /// Switch to `view`, remounting its table over the cached report.
    pub fn navigate(&mut self, view: View) {
        if view == self.view {
            return;
        }
        info!(from = %self.view, to = %view, "Navigating");
        self.view = view;
        self.table = None;
        self.mounted_generation = None;
        self.page_error = None;
        self.type_filter_enabled = false;
        self.page_prompt = None;
        self.cursor = TableCursor::default();
        self.sync_table();
    }

    // ===== Search =====

    /// Apply a search transition and refilter the table.
    pub fn update_search(&mut self, transition: impl FnOnce(SearchState) -> SearchState) {
        self.search = transition(std::mem::take(&mut self.search));
        if let Some(table) = self.table.as_mut() {
            table.set_search(self.search.text());
        }
        self.clamp_cursor();
    }

    // ===== Actions =====

    /// Apply a bound key action. Returns true if the app should quit.
    pub fn apply_action(&mut self, action: KeyAction) -> bool {
        if self.help_visible
            && !matches!(
                action,
                KeyAction::Help | KeyAction::Quit | KeyAction::CancelSearch
            )
        {
            return false;
        }

        match action {
            KeyAction::Quit => return true,
            KeyAction::Help => self.help_visible = !self.help_visible,
            KeyAction::Refresh => {
                self.query.refresh();
                self.status = Some(StatusMessage::info("Refreshing report"));
            }

            KeyAction::RowUp => self.cursor.row = self.cursor.row.saturating_sub(1),
            KeyAction::RowDown => {
                self.cursor.row += 1;
                self.clamp_cursor();
            }
            KeyAction::ColumnLeft => self.cursor.column = self.cursor.column.saturating_sub(1),
            KeyAction::ColumnRight => {
                self.cursor.column += 1;
                self.clamp_cursor();
            }

            KeyAction::PreviousPage => self.with_table(DataTable::previous_page),
            KeyAction::NextPage => self.with_table(DataTable::next_page),
            KeyAction::FirstPage => self.with_table(|t| t.set_page_index(0)),
            KeyAction::LastPage => self.with_table(DataTable::last_page),
            KeyAction::GoToPage => {
                if self.table.as_ref().is_some_and(|t| t.total_pages() > 0) {
                    self.page_prompt = Some(String::new());
                }
            }

            KeyAction::ToggleSort => self.toggle_sort_at_cursor(),
            KeyAction::ToggleRowSelection => self.toggle_row_at_cursor(),
            KeyAction::ToggleAllSelection => {
                if let Some(table) = self.table.as_mut() {
                    if !table.toggle_all_selected() {
                        self.status = Some(StatusMessage::info("Row selection is off on this page"));
                    }
                }
            }
            KeyAction::CycleTypeFilter => {
                if self.type_filter_enabled {
                    self.with_table(DataTable::cycle_type_filter);
                }
            }
            KeyAction::ClearFilters => {
                self.search = SearchState::Inactive;
                self.with_table(|t| t.set_filter(FilterInput::default()));
            }

            KeyAction::StartSearch => self.update_search(search_input_handler::activate_search_input),
            KeyAction::SubmitSearch => self.update_search(search_input_handler::submit_search),
            KeyAction::CancelSearch => {
                if self.help_visible {
                    self.help_visible = false;
                } else if self.search.is_typing() {
                    self.update_search(search_input_handler::cancel_search);
                }
            }

            KeyAction::ExportCsv => self.export(ExportFormat::Csv),
            KeyAction::ExportXlsx => self.export(ExportFormat::Xlsx),

            KeyAction::NextView => self.navigate(self.view.next()),
            KeyAction::PreviousView => self.navigate(self.view.previous()),
            KeyAction::SelectView(n) => {
                if let Some(view) = View::from_number(n) {
                    self.navigate(view);
                }
            }
        }
        false
    }

    // ===== Page prompt =====

    /// Append a digit to the open page prompt. Other characters are ignored.
    pub fn push_page_digit(&mut self, ch: char) {
        if let Some(digits) = self.page_prompt.as_mut() {
            if ch.is_ascii_digit() && digits.len() < MAX_PAGE_DIGITS {
                digits.push(ch);
            }
        }
    }

    /// Remove the last typed digit.
    pub fn pop_page_digit(&mut self) {
        if let Some(digits) = self.page_prompt.as_mut() {
            digits.pop();
        }
    }

    /// Close the prompt without jumping.
    pub fn cancel_page_prompt(&mut self) {
        self.page_prompt = None;
    }

    /// Close the prompt and jump to the typed 1-based page. Numbers past the
    /// last page land on the last page.
    pub fn submit_page_prompt(&mut self) {
        let Some(digits) = self.page_prompt.take() else {
            return;
        };
        match digits.parse::<usize>() {
            Ok(page) if page >= 1 => self.with_table(|t| t.set_page_index(page - 1)),
            _ if digits.is_empty() => {}
            _ => {
                self.status = Some(StatusMessage::error(format!(
                    "Invalid page number: {digits:?}"
                )));
            }
        }
    }

    fn with_table(&mut self, f: impl FnOnce(&mut DataTable<Campaign>)) {
        if let Some(table) = self.table.as_mut() {
            f(table);
        }
        self.clamp_cursor();
    }

    fn toggle_sort_at_cursor(&mut self) {
        let column = self.cursor.column;
        if let Some(table) = self.table.as_mut() {
            let id = table.columns().get(column).map(|c| c.id().to_string());
            if let Some(id) = id {
                table.toggle_sort(&id);
            }
        }
    }

    fn toggle_row_at_cursor(&mut self) {
        let row = self.cursor.row;
        let Some(table) = self.table.as_mut() else {
            return;
        };
        let Some(&row_id) = table.page_indices().get(row) else {
            return;
        };
        if !table.toggle_row_selected(row_id) {
            self.status = Some(StatusMessage::info("Row selection is off on this page"));
        }
    }

    fn export(&mut self, format: ExportFormat) {
        let Some(table) = self.table.as_ref() else {
            self.status = Some(StatusMessage::error("Nothing to export yet"));
            return;
        };
        self.status = Some(match table.export(&self.export_dir, format) {
            Ok(path) => StatusMessage::info(format!(
                "Exported {} rows to {}",
                table.filtered_len(),
                path.display()
            )),
            Err(err) => {
                warn!(error = %err, format = format.label(), "Export failed");
                StatusMessage::error(format!("Export failed: {err}"))
            }
        });
    }

    fn clamp_cursor(&mut self) {
        let (rows, columns) = self
            .table
            .as_ref()
            .map_or((0, 0), |t| (t.page_indices().len(), t.columns().len()));
        self.cursor.row = self.cursor.row.min(rows.saturating_sub(1));
        self.cursor.column = self.cursor.column.min(columns.saturating_sub(1));
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
