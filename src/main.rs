//! roidash - Entry Point

use clap::{Parser, ValueEnum};
use roidash::config::{resolve_config, CliOverrides, ResolvedConfig};
use roidash::model::AppError;
use roidash::pages::PageSettings;
use roidash::report::{ReportClient, ReportQuery, ReportSource};
use roidash::route::View;
use roidash::state::{AppState, PageContent};
use roidash::table::{ExportFormat, FilterInput};
use roidash::view::ColorConfig;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tracing::info;

/// roidash - terminal dashboard for marketing-campaign ROI reports
#[derive(Parser, Debug)]
#[command(name = "roidash")]
#[command(version)]
#[command(about = "Terminal dashboard for marketing-campaign ROI reports")]
pub struct Args {
    /// View to open (`roi_tracker`, `performance_tracker`, `roi_marketing`).
    /// Unknown values fall back to the ROI Tracker.
    #[arg(short, long)]
    pub page: Option<String>,

    /// Read the report from a local JSON file instead of the endpoint
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Report endpoint URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// API key sent as the `api_key` query parameter
    #[arg(long)]
    pub api_key: Option<String>,

    /// Workspace shown in the header
    #[arg(long)]
    pub workspace_id: Option<String>,

    /// Rows per table page (must be positive)
    #[arg(long)]
    pub page_size: Option<NonZeroUsize>,

    /// Start with this search applied
    #[arg(short, long)]
    pub search: Option<String>,

    /// Start with this campaign type selected
    #[arg(short = 't', long)]
    pub type_filter: Option<String>,

    /// Export the filtered table and exit without starting the TUI
    #[arg(long, value_enum)]
    pub export: Option<ExportArg>,

    /// Directory receiving exports
    #[arg(long)]
    pub export_dir: Option<PathBuf>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Export formats accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportArg {
    /// Comma-separated values.
    Csv,
    /// Excel workbook.
    Xlsx,
}

impl From<ExportArg> for ExportFormat {
    fn from(arg: ExportArg) -> Self {
        match arg {
            ExportArg::Csv => ExportFormat::Csv,
            ExportArg::Xlsx => ExportFormat::Xlsx,
        }
    }
}

impl Args {
    fn cli_overrides(&self) -> CliOverrides {
        CliOverrides {
            endpoint: self.endpoint.clone(),
            api_key: self.api_key.clone(),
            workspace_id: self.workspace_id.clone(),
            page_size: self.page_size,
            page: self.page.clone(),
            export_dir: self.export_dir.clone(),
        }
    }

    fn initial_filter(&self) -> FilterInput {
        FilterInput::new(self.search.clone().unwrap_or_default(), self.type_filter.clone())
    }
}

fn report_source(args: &Args, config: &ResolvedConfig) -> Result<ReportSource, AppError> {
    Ok(match &args.input {
        Some(path) => ReportSource::File(path.clone()),
        None => ReportSource::Http(ReportClient::new(
            config.endpoint.clone(),
            config.api_key.clone(),
            config.request_timeout,
        )?),
    })
}

/// Fetch, mount the requested view and write the export. Returns the file path.
fn export_headless(
    mut app_state: AppState,
    format: ExportFormat,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    app_state.wait_for_report();
    let dir = app_state.export_dir.clone();
    match app_state.content() {
        PageContent::Table(table) => {
            let path = table.export(&dir, format).map_err(AppError::from)?;
            info!(path = %path.display(), rows = table.filtered_len(), "Headless export written");
            Ok(path)
        }
        PageContent::Failed(err) => Err(err.to_string().into()),
        PageContent::Broken(err) => Err(AppError::Table(err.clone()).into()),
        PageContent::Loading => Err("Report did not finish loading".into()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    // Defaults → Config File → Env Vars → CLI Args
    let config = resolve_config(args.config.clone(), args.cli_overrides()).map_err(AppError::from)?;

    roidash::logging::init(&config.log_file_path).map_err(AppError::from)?;

    info!(
        endpoint = %config.endpoint,
        page_size = config.page_size.get(),
        default_page = ?config.default_page,
        "Configuration loaded and resolved"
    );

    let source = report_source(&args, &config)?;
    info!(source = %source.describe(), "Report source selected");

    let view = View::resolve(config.default_page.as_deref());
    let settings = PageSettings {
        page_size: config.page_size,
    };
    let mut app_state =
        AppState::new(view, settings, ReportQuery::new(source)).with_initial_filter(args.initial_filter());
    app_state.workspace_id = config.workspace_id.clone();
    app_state.export_dir = config.export_dir.clone();

    if let Some(format) = args.export {
        let path = export_headless(app_state, format.into())?;
        println!("{}", path.display());
        return Ok(());
    }

    roidash::view::run(app_state, ColorConfig::from_env_and_args(args.no_color))
        .map_err(AppError::from)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["roidash", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["roidash", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["roidash"]);
        assert_eq!(args.page, None);
        assert_eq!(args.input, None);
        assert_eq!(args.search, None);
        assert_eq!(args.export, None);
        assert!(!args.no_color);
        assert_eq!(args.cli_overrides(), CliOverrides::default());
        assert!(args.initial_filter().is_identity());
    }

    #[test]
    fn test_page_flag_is_forwarded() {
        let args = Args::parse_from(["roidash", "--page", "roi_marketing"]);
        assert_eq!(args.cli_overrides().page.as_deref(), Some("roi_marketing"));
    }

    #[test]
    fn test_page_size_rejects_zero() {
        let result = Args::try_parse_from(["roidash", "--page-size", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_export_formats() {
        let args = Args::parse_from(["roidash", "--export", "xlsx"]);
        assert_eq!(args.export, Some(ExportArg::Xlsx));
        assert_eq!(ExportFormat::from(ExportArg::Csv), ExportFormat::Csv);

        let result = Args::try_parse_from(["roidash", "--export", "pdf"]);
        assert_eq!(result.unwrap_err().kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_initial_filter_from_flags() {
        let args = Args::parse_from(["roidash", "-s", "click", "-t", "Paid"]);
        let filter = args.initial_filter();
        assert_eq!(filter.search, "click");
        assert_eq!(filter.type_filter.as_deref(), Some("Paid"));
    }

    #[test]
    fn test_input_selects_file_source() {
        let args = Args::parse_from(["roidash", "--input", "report.json"]);
        let source = report_source(&args, &ResolvedConfig::default()).unwrap();
        assert!(matches!(source, ReportSource::File(path) if path == PathBuf::from("report.json")));
    }

    #[test]
    fn test_headless_export_writes_file() {
        let dir = std::env::temp_dir().join(format!("roidash-main-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let input = dir.join("report.json");
        std::fs::write(
            &input,
            r#"{"report":{"campaigns":[{"name":"A","channel":"Web","type":"Paid","spend":5}]}}"#,
        )
        .unwrap();

        let mut state = AppState::new(
            View::RoiTracker,
            PageSettings::default(),
            ReportQuery::new(ReportSource::File(input)),
        );
        state.export_dir = dir.clone();
        let path = export_headless(state, ExportFormat::Csv).unwrap();
        assert_eq!(path, dir.join("table_data.csv"));
        let csv = std::fs::read_to_string(&path).unwrap();
        assert!(csv.lines().nth(1).unwrap().starts_with("A,Web,Paid"));

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_headless_export_reports_fetch_failure() {
        let state = AppState::new(
            View::RoiTracker,
            PageSettings::default(),
            ReportQuery::new(ReportSource::File(PathBuf::from("/nonexistent/roidash.json"))),
        );
        let err = export_headless(state, ExportFormat::Csv).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read report file"));
    }
}
