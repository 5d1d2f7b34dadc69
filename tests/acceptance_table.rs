//! Acceptance tests: worked examples for the table, pages and navigation.

use calamine::{open_workbook, Data, Reader, Xlsx};
use roidash::model::{Campaign, Report};
use roidash::pages::{Page, PageSettings};
use roidash::route::View;
use roidash::table::{
    ColumnDef, Columns, DataTable, ExportFormat, FilterInput, SortKey, SortState, TableOptions,
};
use serde_json::{json, Value};
use std::num::NonZeroUsize;
use std::path::PathBuf;

// ===== Test Helpers =====

const REPORT: &str = r#"{"report":{"campaigns":[
    {"name":"Spring Sale","channel":"Clicks Network","type":"Paid","targetAudience":"Adults",
     "spend":12500,"metrics":{"impressions":50000,"clicks":2500,"conversions":10,"roi":1.8},
     "dates":{"startDate":"2024-03-01","endDate":"2024-03-31"}},
    {"name":"Newsletter","channel":"Email","type":"Owned","spend":100,
     "metrics":{"impressions":900,"clicks":45,"conversions":5,"roi":3.2}},
    {"name":"Brand Push","channel":"Social","type":"Paid","spend":4000}
]}}"#;

fn campaigns() -> Vec<Campaign> {
    serde_json::from_str::<Report>(REPORT).unwrap().into_campaigns()
}

fn mount(view: View) -> DataTable<Campaign> {
    Page::for_view(view, &PageSettings::default())
        .unwrap()
        .mount(campaigns())
        .unwrap()
}

fn campaign_names(table: &DataTable<Campaign>) -> Vec<&str> {
    table
        .sorted_rows()
        .map(|c| c.name.as_deref().unwrap_or_default())
        .collect()
}

fn spend_table(options: TableOptions) -> DataTable<Value> {
    let columns = Columns::new(vec![
        ColumnDef::path("name", "name", "name"),
        ColumnDef::path("spend", "spend", "spend"),
    ])
    .unwrap();
    let rows = vec![
        json!({"name": "A", "spend": 100}),
        json!({"name": "B", "spend": 50}),
    ];
    DataTable::new(columns, rows, options).unwrap()
}

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "roidash-acceptance-{}-{name}",
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

// ===== Sorting and export =====

#[test]
fn spend_ascending_puts_cheaper_row_first() {
    let table = spend_table(TableOptions {
        initial_sorting: SortState::single(SortKey::asc("spend")),
        ..TableOptions::default()
    });
    let names: Vec<&str> = table.sorted_rows().map(|r| r["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["B", "A"]);
}

#[test]
fn csv_of_unsorted_rows_keeps_input_order() {
    let table = spend_table(TableOptions {
        enable_exports: true,
        ..TableOptions::default()
    });
    assert_eq!(table.csv_string().unwrap(), "name,spend\nA,100\nB,50\n");
}

#[test]
fn csv_quotes_delimiters_and_newlines() {
    let columns = Columns::new(vec![ColumnDef::path("name", "name", "name")]).unwrap();
    let rows = vec![json!({"name": "Sale, \"Big\""}), json!({"name": "two\nlines"})];
    let table = DataTable::new(columns, rows, TableOptions::default()).unwrap();
    assert_eq!(
        table.csv_string().unwrap(),
        "name\n\"Sale, \"\"Big\"\"\"\n\"two\nlines\"\n"
    );
}

#[test]
fn spreadsheet_export_reads_back_with_numeric_cells() {
    let dir = temp_dir("xlsx");
    let mut table = mount(View::MarketingRoi);
    table.set_type_filter(Some("Paid".to_string()));

    let path = table.export(&dir, ExportFormat::Xlsx).unwrap();
    assert_eq!(path, dir.join("table_data.xlsx"));

    let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
    let range = workbook.worksheet_range("Sheet1").unwrap();
    let rows: Vec<&[Data]> = range.rows().collect();

    assert_eq!(rows.len(), 3, "header plus two paid campaigns");
    assert_eq!(rows[0][0], Data::String("Campaign Name".to_string()));
    assert_eq!(rows[0][4], Data::String("Cost / Conversion".to_string()));
    // Sorted by ROI descending; Brand Push has no ROI, so it leads.
    assert_eq!(rows[1][0], Data::String("Brand Push".to_string()));
    assert_eq!(rows[1][4], Data::Empty);
    assert_eq!(rows[2][0], Data::String("Spring Sale".to_string()));
    assert_eq!(rows[2][2], Data::Float(12500.0));
    assert_eq!(rows[2][4], Data::Float(1250.0));

    let _ = std::fs::remove_dir_all(dir);
}

// ===== Pagination =====

#[test]
fn twenty_five_rows_make_three_pages_of_ten() {
    let columns = Columns::new(vec![ColumnDef::path("n", "n", "n")]).unwrap();
    let rows: Vec<Value> = (0..25).map(|n| json!({ "n": n })).collect();
    let mut table = DataTable::new(
        columns,
        rows,
        TableOptions {
            page_size: NonZeroUsize::new(10).unwrap(),
            ..TableOptions::default()
        },
    )
    .unwrap();

    assert_eq!(table.total_pages(), 3);
    table.previous_page();
    assert_eq!(table.page_index(), 0);

    table.last_page();
    assert_eq!(table.page_index(), 2);
    assert_eq!(table.page_indices().len(), 5);
    table.next_page();
    assert_eq!(table.page_index(), 2);
    assert_eq!(table.showing_bounds(), (21, 25));
}

// ===== Filtering =====

#[test]
fn search_matches_channel_substring_case_insensitively() {
    let mut table = mount(View::RoiTracker);
    table.set_search("click");
    assert_eq!(campaign_names(&table), vec!["Spring Sale"]);

    table.set_search("zzz");
    assert!(campaign_names(&table).is_empty());
    assert_eq!(table.total_pages(), 0);
    assert_eq!(table.showing_bounds(), (0, 0));
}

#[test]
fn search_reaches_nested_metric_values() {
    let mut table = mount(View::RoiTracker);
    table.set_search("3.2");
    assert_eq!(campaign_names(&table), vec!["Newsletter"]);
}

#[test]
fn type_filter_and_search_compose() {
    let mut table = mount(View::MarketingRoi);
    table.set_filter(FilterInput::new("push", Some("Paid".to_string())));
    assert_eq!(campaign_names(&table), vec!["Brand Push"]);

    table.set_filter(FilterInput::new("push", Some("Owned".to_string())));
    assert!(campaign_names(&table).is_empty());
}

// ===== Pages and navigation =====

/// Missing values sort last ascending, so they lead a descending sort.
#[test]
fn pages_mount_with_their_initial_sort() {
    assert_eq!(
        campaign_names(&mount(View::RoiTracker)),
        vec!["Brand Push", "Newsletter", "Spring Sale"]
    );
    assert_eq!(
        campaign_names(&mount(View::PerformanceTracker)),
        vec!["Brand Push", "Spring Sale", "Newsletter"]
    );
    assert_eq!(
        campaign_names(&mount(View::MarketingRoi)),
        vec!["Brand Push", "Newsletter", "Spring Sale"]
    );
}

#[test]
fn only_performance_tracker_selects_rows() {
    let mut performance = mount(View::PerformanceTracker);
    assert!(performance.toggle_row_selected(0));
    assert_eq!(performance.selected_rows().len(), 1);

    let mut roi = mount(View::RoiTracker);
    assert!(!roi.toggle_row_selected(0));
}

#[test]
fn unknown_page_parameter_lands_on_roi_tracker() {
    assert_eq!(View::resolve(Some("nope")), View::RoiTracker);
    assert_eq!(View::resolve(None), View::RoiTracker);
    assert_eq!(View::resolve(Some("roi_marketing")), View::MarketingRoi);
}
