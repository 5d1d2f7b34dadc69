//! Performance Tracker: funnel metrics with row selection.

use super::{Page, PageSettings};
use crate::model::format::{count_or_dash, percent};
use crate::model::Campaign;
use crate::route::View;
use crate::table::{CellValue, ColumnDef, Columns, SortKey, SortState, TableError, TableOptions};

pub(super) fn page(settings: &PageSettings) -> Result<Page, TableError> {
    let columns = Columns::new(vec![
        ColumnDef::path("name", "Campaign Name", "name"),
        ColumnDef::path("channel", "Channel", "channel"),
        ColumnDef::path("impressions", "Impressions", "metrics.impressions")
            .cell(|c: &Campaign| count_or_dash(c.impressions())),
        ColumnDef::path("clicks", "Clicks", "metrics.clicks")
            .cell(|c: &Campaign| count_or_dash(c.clicks())),
        ColumnDef::path("conversions", "Conversions", "metrics.conversions")
            .cell(|c: &Campaign| count_or_dash(c.conversions())),
        ColumnDef::derived("ctr", "CTR", |c: &Campaign| {
            CellValue::from_option(c.click_through_rate())
        })
        .centered()
        .cell(|c: &Campaign| percent(c.click_through_rate())),
        ColumnDef::derived("conversionRate", "Conversion Rate", |c: &Campaign| {
            CellValue::from_option(c.conversion_rate())
        })
        .centered()
        .cell(|c: &Campaign| percent(c.conversion_rate())),
    ])?;

    Ok(Page {
        view: View::PerformanceTracker,
        columns,
        options: TableOptions {
            enable_sorting: true,
            initial_sorting: SortState::single(SortKey::desc("impressions")),
            enable_pagination: true,
            page_size: settings.page_size,
            row_selection: true,
            enable_exports: true,
        },
        type_filter: false,
    })
}
