//! Report pages: column definitions and table options per view.

mod marketing_roi;
mod performance_tracker;
mod roi_tracker;

use crate::model::Campaign;
use crate::route::View;
use crate::table::pagination::DEFAULT_PAGE_SIZE;
use crate::table::{Columns, DataTable, TableError, TableOptions};
use std::num::NonZeroUsize;

/// Width of the currency and date columns, in terminal cells.
pub(crate) const WIDE_COLUMN: u16 = 15;

/// Page-independent settings resolved from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSettings {
    /// Rows per table page.
    pub page_size: NonZeroUsize,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Everything a view needs to mount its table.
pub struct Page {
    /// View this page renders.
    pub view: View,
    /// Column definitions, in display order.
    pub columns: Columns<Campaign>,
    /// Table feature flags and initial sort.
    pub options: TableOptions,
    /// Whether the type filter can be cycled on this page.
    pub type_filter: bool,
}

impl Page {
    /// Definition of `view`'s page.
    pub fn for_view(view: View, settings: &PageSettings) -> Result<Page, TableError> {
        match view {
            View::RoiTracker => roi_tracker::page(settings),
            View::PerformanceTracker => performance_tracker::page(settings),
            View::MarketingRoi => marketing_roi::page(settings),
        }
    }

    /// Mount a fresh table over `rows`.
    pub fn mount(self, rows: Vec<Campaign>) -> Result<DataTable<Campaign>, TableError> {
        DataTable::new(self.columns, rows, self.options)
    }
}
