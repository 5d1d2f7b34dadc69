//! ROI Tracker: the full campaign report.

use super::{Page, PageSettings, WIDE_COLUMN};
use crate::model::format::{count_or_dash, currency, MISSING};
use crate::model::Campaign;
use crate::route::View;
use crate::table::{ColumnDef, Columns, SortKey, SortState, TableError, TableOptions};

pub(super) fn page(settings: &PageSettings) -> Result<Page, TableError> {
    let columns = Columns::new(vec![
        ColumnDef::path("name", "Campaign Name", "name"),
        ColumnDef::path("channel", "Channel", "channel"),
        ColumnDef::path("type", "Type", "type"),
        ColumnDef::path("targetAudience", "Target Audience", "targetAudience"),
        ColumnDef::path("spend", "Spend ($)", "spend")
            .width(WIDE_COLUMN)
            .cell(|c: &Campaign| currency(c.spend)),
        ColumnDef::path("impressions", "Impressions", "metrics.impressions")
            .cell(|c: &Campaign| count_or_dash(c.impressions())),
        ColumnDef::path("clicks", "Clicks", "metrics.clicks")
            .cell(|c: &Campaign| count_or_dash(c.clicks())),
        ColumnDef::path("conversions", "Conversions", "metrics.conversions")
            .cell(|c: &Campaign| count_or_dash(c.conversions())),
        ColumnDef::path("roi", "ROI", "metrics.roi")
            .cell(|c: &Campaign| c.roi().map_or_else(|| MISSING.to_string(), |r| r.to_string())),
        ColumnDef::path("startDate", "Start Date", "dates.startDate")
            .width(WIDE_COLUMN)
            .cell(|c: &Campaign| c.start_date().unwrap_or(MISSING).to_string()),
        ColumnDef::path("endDate", "End Date", "dates.endDate")
            .width(WIDE_COLUMN)
            .cell(|c: &Campaign| c.end_date().unwrap_or(MISSING).to_string()),
    ])?;

    Ok(Page {
        view: View::RoiTracker,
        columns,
        options: TableOptions {
            enable_sorting: true,
            initial_sorting: SortState::single(SortKey::asc("name")),
            enable_pagination: true,
            page_size: settings.page_size,
            row_selection: false,
            enable_exports: true,
        },
        type_filter: false,
    })
}
