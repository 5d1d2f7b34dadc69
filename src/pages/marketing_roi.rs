//! Marketing ROI: spend efficiency by campaign type.

use super::{Page, PageSettings, WIDE_COLUMN};
use crate::model::format::{currency, MISSING};
use crate::model::Campaign;
use crate::route::View;
use crate::table::{CellValue, ColumnDef, Columns, SortKey, SortState, TableError, TableOptions};

/// Cost per conversion rounded to cents.
fn cost_per_conversion(c: &Campaign) -> Option<f64> {
    c.cost_per_conversion().map(|cost| (cost * 100.0).round() / 100.0)
}

pub(super) fn page(settings: &PageSettings) -> Result<Page, TableError> {
    let columns = Columns::new(vec![
        ColumnDef::path("name", "Campaign Name", "name"),
        ColumnDef::path("type", "Type", "type"),
        ColumnDef::path("spend", "Spend ($)", "spend")
            .width(WIDE_COLUMN)
            .cell(|c: &Campaign| currency(c.spend)),
        ColumnDef::path("roi", "ROI", "metrics.roi")
            .cell(|c: &Campaign| c.roi().map_or_else(|| MISSING.to_string(), |r| r.to_string())),
        ColumnDef::derived("costPerConversion", "Cost / Conversion", |c: &Campaign| {
            CellValue::from_option(cost_per_conversion(c))
        })
        .width(WIDE_COLUMN)
        .cell(|c: &Campaign| currency(cost_per_conversion(c))),
    ])?;

    Ok(Page {
        view: View::MarketingRoi,
        columns,
        options: TableOptions {
            enable_sorting: true,
            initial_sorting: SortState::single(SortKey::desc("roi")),
            enable_pagination: true,
            page_size: settings.page_size,
            row_selection: false,
            enable_exports: true,
        },
        type_filter: true,
    })
}
