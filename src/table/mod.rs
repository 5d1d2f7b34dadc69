//! Generic data table engine.
//!
//! [`DataTable`] owns the sort, pagination and selection state of one mounted
//! table and derives the visible rows from its raw rows:
//!
//! raw rows → filter (search + type) → sort → paginate
//!
//! The filtered and sorted orders are cached and only recomputed when their
//! inputs change, so rendering reads them without any work.

pub mod column;
pub mod error;
pub mod export;
pub mod filter;
pub mod pagination;
pub mod row;
pub mod selection;
pub mod sort;
pub mod value;

pub use column::{Accessor, ColumnDef, Columns};
pub use error::{ExportError, TableError};
pub use export::{ExportFormat, ExportRecords};
pub use filter::FilterInput;
pub use pagination::{PageItem, PageLinks, PaginationState};
pub use row::TableRow;
pub use selection::SelectionState;
pub use sort::{SortDirection, SortKey, SortState};
pub use value::CellValue;

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Feature switches for one table instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    /// Allow header toggling and apply sort keys.
    pub enable_sorting: bool,
    /// Sort applied when the table is mounted.
    pub initial_sorting: SortState,
    /// Split rows into pages. When off every filtered row is on one page.
    pub enable_pagination: bool,
    /// Rows per page.
    pub page_size: NonZeroUsize,
    /// Show the leading checkbox column.
    pub row_selection: bool,
    /// Allow CSV and spreadsheet export.
    pub enable_exports: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            enable_sorting: true,
            initial_sorting: SortState::default(),
            enable_pagination: true,
            page_size: pagination::DEFAULT_PAGE_SIZE,
            row_selection: false,
            enable_exports: false,
        }
    }
}

type SelectionCallback<T> = Box<dyn FnMut(&[&T]) + Send>;

/// A mounted table over rows of type `T`.
pub struct DataTable<T> {
    columns: Columns<T>,
    rows: Vec<T>,
    options: TableOptions,
    filter: FilterInput,
    sorting: SortState,
    pagination: PaginationState,
    selection: SelectionState,
    /// Positions passing the filter, original order.
    filtered: Vec<usize>,
    /// `filtered` after sorting.
    ordered: Vec<usize>,
    filter_runs: usize,
    on_selection_change: Option<SelectionCallback<T>>,
}

impl<T: TableRow> DataTable<T> {
    /// Mount a table.
    ///
    /// # Errors
    ///
    /// Returns `TableError::UnknownSortColumn` if the initial sort names a
    /// column that does not exist.
    pub fn new(columns: Columns<T>, rows: Vec<T>, options: TableOptions) -> Result<Self, TableError> {
        validate_sort(&columns, &options.initial_sorting)?;
        let mut table = Self {
            sorting: options.initial_sorting.clone(),
            pagination: PaginationState::new(options.page_size),
            columns,
            rows,
            options,
            filter: FilterInput::default(),
            selection: SelectionState::default(),
            filtered: Vec::new(),
            ordered: Vec::new(),
            filter_runs: 0,
            on_selection_change: None,
        };
        table.refilter();
        Ok(table)
    }

    // ===== Accessors =====

    /// Column definitions.
    pub fn columns(&self) -> &Columns<T> {
        &self.columns
    }

    /// Raw rows in input order.
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Options the table was built with.
    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Current filter input.
    pub fn filter(&self) -> &FilterInput {
        &self.filter
    }

    /// Current sort keys.
    pub fn sorting(&self) -> &SortState {
        &self.sorting
    }

    /// Pagination state.
    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    /// Selected row ids.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// How many times the filter has been evaluated since mount.
    pub fn filter_recomputations(&self) -> usize {
        self.filter_runs
    }

    // ===== Data and filtering =====

    /// Replace the raw rows. Clears the selection and returns to page one.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;
        self.selection.clear();
        self.refilter();
    }

    /// Replace the search text, keeping the type filter.
    pub fn set_search(&mut self, search: impl Into<String>) {
        let filter = FilterInput {
            search: search.into(),
            type_filter: self.filter.type_filter.clone(),
        };
        self.set_filter(filter);
    }

    /// Replace the type filter, keeping the search text.
    pub fn set_type_filter(&mut self, type_filter: Option<String>) {
        let filter = FilterInput {
            search: self.filter.search.clone(),
            type_filter,
        };
        self.set_filter(filter);
    }

    /// Apply new filter input. No work is done if it is unchanged.
    pub fn set_filter(&mut self, filter: FilterInput) {
        if filter == self.filter {
            return;
        }
        self.filter = filter;
        self.refilter();
    }

    /// Distinct values of the `type` field across all rows.
    pub fn type_options(&self) -> Vec<String> {
        filter::distinct_types(&self.rows)
    }

    /// Advance the type filter: none → each distinct type → none.
    pub fn cycle_type_filter(&mut self) {
        let options = self.type_options();
        let next = match &self.filter.type_filter {
            None => options.first().cloned(),
            Some(current) => options
                .iter()
                .position(|t| t == current)
                .and_then(|i| options.get(i + 1))
                .cloned(),
        };
        self.set_type_filter(next);
    }

    /// Positions of rows passing the filter, in original order.
    pub fn filtered_indices(&self) -> &[usize] {
        &self.filtered
    }

    /// Number of rows passing the filter.
    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Filtered rows in current sort order.
    pub fn sorted_indices(&self) -> &[usize] {
        &self.ordered
    }

    /// Filtered rows in current sort order.
    pub fn sorted_rows(&self) -> impl Iterator<Item = &T> + '_ {
        self.ordered.iter().map(|&i| &self.rows[i])
    }

    fn refilter(&mut self) {
        self.filtered = filter::filter_indices(&self.rows, &self.filter);
        self.filter_runs += 1;
        debug!(
            rows = self.rows.len(),
            matched = self.filtered.len(),
            search = %self.filter.search,
            type_filter = ?self.filter.type_filter,
            "Table filter recomputed"
        );
        self.pagination.reset();
        self.resort();
    }

    fn resort(&mut self) {
        self.ordered = self.filtered.clone();
        if self.options.enable_sorting {
            sort::sort_indices(&self.rows, &mut self.ordered, &self.columns, &self.sorting);
        }
        let pages = self.total_pages();
        self.pagination.clamp(pages);
    }

    // ===== Sorting =====

    /// Replace the sort.
    ///
    /// # Errors
    ///
    /// Returns `TableError::UnknownSortColumn` for keys naming missing columns.
    pub fn set_sorting(&mut self, sorting: SortState) -> Result<(), TableError> {
        validate_sort(&self.columns, &sorting)?;
        self.sorting = sorting;
        self.resort();
        Ok(())
    }

    /// Header click on `column_id`. Returns false if the column cannot sort.
    pub fn toggle_sort(&mut self, column_id: &str) -> bool {
        if !self.options.enable_sorting {
            return false;
        }
        match self.columns.find(column_id) {
            Some(column) if column.is_sortable() => {}
            _ => return false,
        }
        let first = sort::first_sort_direction(&self.rows, &self.columns, column_id);
        self.sorting = self.sorting.toggle(column_id, first);
        self.resort();
        true
    }

    /// Effective direction shown in the header for `column_id`.
    pub fn sort_direction(&self, column_id: &str) -> Option<SortDirection> {
        if self.options.enable_sorting {
            self.sorting.direction_of(column_id)
        } else {
            None
        }
    }

    // ===== Pagination =====

    fn effective_page_size(&self) -> NonZeroUsize {
        if self.options.enable_pagination {
            self.pagination.page_size()
        } else {
            NonZeroUsize::new(self.ordered.len()).unwrap_or(NonZeroUsize::MIN)
        }
    }

    /// Page count for the filtered rows. Zero when nothing matches.
    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.ordered.len(), self.effective_page_size())
    }

    /// Zero-based current page.
    pub fn page_index(&self) -> usize {
        self.pagination.page_index()
    }

    /// Step back one page.
    pub fn previous_page(&mut self) {
        self.pagination.previous_page();
    }

    /// Step forward one page.
    pub fn next_page(&mut self) {
        let pages = self.total_pages();
        self.pagination.next_page(pages);
    }

    /// Jump to a zero-based page, clamped to the last page.
    pub fn set_page_index(&mut self, index: usize) {
        let pages = self.total_pages();
        self.pagination.set_page_index(index, pages);
    }

    /// Jump to the last page.
    pub fn last_page(&mut self) {
        let pages = self.total_pages();
        self.pagination.set_page_index(pages.saturating_sub(1), pages);
    }

    /// Whether a previous page exists.
    pub fn can_previous_page(&self) -> bool {
        self.pagination.can_previous_page()
    }

    /// Whether a next page exists.
    pub fn can_next_page(&self) -> bool {
        self.pagination.can_next_page(self.total_pages())
    }

    /// Row positions visible on the current page, in sort order.
    pub fn page_indices(&self) -> &[usize] {
        let range = if self.options.enable_pagination {
            self.pagination.page_range(self.ordered.len())
        } else {
            0..self.ordered.len()
        };
        &self.ordered[range]
    }

    /// `(row id, row)` pairs visible on the current page.
    pub fn page_rows(&self) -> Vec<(usize, &T)> {
        self.page_indices()
            .iter()
            .map(|&i| (i, &self.rows[i]))
            .collect()
    }

    /// Page-link items for the footer.
    pub fn page_links(&self) -> PageLinks {
        pagination::page_links(self.pagination.page_index(), self.total_pages())
    }

    /// 1-indexed bounds for "Showing X to Y of Z results".
    pub fn showing_bounds(&self) -> (usize, usize) {
        let mut state = PaginationState::new(self.effective_page_size());
        state.set_page_index(self.pagination.page_index(), self.total_pages());
        pagination::showing_bounds(&state, self.ordered.len())
    }

    // ===== Selection =====

    /// Register the observer notified with the full selected rows.
    pub fn on_selection_change<F>(&mut self, callback: F)
    where
        F: FnMut(&[&T]) + Send + 'static,
    {
        self.on_selection_change = Some(Box::new(callback));
    }

    /// Flip selection of the row at raw position `row_id`.
    ///
    /// Returns false when selection is disabled or the id is out of range.
    pub fn toggle_row_selected(&mut self, row_id: usize) -> bool {
        if !self.options.row_selection || row_id >= self.rows.len() {
            return false;
        }
        self.selection.toggle(row_id);
        self.notify_selection();
        true
    }

    /// Header checkbox: applies to every filtered row.
    pub fn toggle_all_selected(&mut self) -> bool {
        if !self.options.row_selection {
            return false;
        }
        self.selection.toggle_all(&self.filtered);
        self.notify_selection();
        true
    }

    /// Header checkbox state.
    pub fn is_all_selected(&self) -> bool {
        self.selection.all_selected(&self.filtered)
    }

    /// Whether the row at raw position `row_id` is selected.
    pub fn is_row_selected(&self, row_id: usize) -> bool {
        self.selection.is_selected(row_id)
    }

    /// Selected rows in input order.
    pub fn selected_rows(&self) -> Vec<&T> {
        self.selection.selected_rows(&self.rows)
    }

    fn notify_selection(&mut self) {
        let selected = self.selection.selected_rows(&self.rows);
        if let Some(callback) = self.on_selection_change.as_mut() {
            callback(&selected);
        }
    }

    // ===== Export =====

    /// Column values of the filtered rows, in current sort order.
    pub fn export_records(&self) -> ExportRecords {
        ExportRecords::collect(&self.columns, self.sorted_rows())
    }

    /// Filtered, sorted rows as CSV text.
    pub fn csv_string(&self) -> Result<String, ExportError> {
        export::csv_string(&self.export_records())
    }

    /// Filtered, sorted rows as an xlsx workbook.
    pub fn xlsx_bytes(&self) -> Result<Vec<u8>, ExportError> {
        export::xlsx_bytes(&self.export_records())
    }

    /// Write `table_data.csv` or `table_data.xlsx` into `dir`.
    ///
    /// # Errors
    ///
    /// `ExportError::Disabled` when exports are off for this table, or the
    /// encoding/write error.
    pub fn export(&self, dir: &Path, format: ExportFormat) -> Result<PathBuf, ExportError> {
        if !self.options.enable_exports {
            return Err(ExportError::Disabled);
        }
        let records = self.export_records();
        let path = export::write_export(dir, format, &records)?;
        info!(
            path = %path.display(),
            rows = records.rows.len(),
            format = format.label(),
            "Exported table"
        );
        Ok(path)
    }
}

fn validate_sort<T: TableRow>(columns: &Columns<T>, sorting: &SortState) -> Result<(), TableError> {
    match sorting
        .keys()
        .iter()
        .find(|k| columns.find(&k.column_id).is_none())
    {
        Some(key) => Err(TableError::UnknownSortColumn(key.column_id.clone())),
        None => Ok(()),
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
