//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::num::{NonZeroU64, NonZeroUsize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::table::pagination::DEFAULT_PAGE_SIZE;

/// Report endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "https://t-propensity-api.addapptation.com/demo_data";

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "ROIDASH_CONFIG";
/// Environment variable overriding the report endpoint.
pub const ENDPOINT_ENV: &str = "ROIDASH_ENDPOINT";
/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "ROIDASH_API_KEY";
/// Environment variable naming the workspace shown in the header.
pub const WORKSPACE_ID_ENV: &str = "ROIDASH_WORKSPACE_ID";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML, an unknown key, or an out-of-range value.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/roidash/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Report endpoint URL.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Sent as the `api_key` query parameter.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Workspace shown in the header.
    #[serde(default)]
    pub workspace_id: Option<String>,

    /// Rows per table page. Must be positive.
    #[serde(default)]
    pub page_size: Option<NonZeroUsize>,

    /// View opened on startup (`roi_tracker`, `performance_tracker`, `roi_marketing`).
    #[serde(default)]
    pub default_page: Option<String>,

    /// Directory receiving `table_data.csv` / `table_data.xlsx`.
    #[serde(default)]
    pub export_dir: Option<PathBuf>,

    /// Request timeout. Unset means wait indefinitely.
    #[serde(default)]
    pub request_timeout_secs: Option<NonZeroU64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Report endpoint URL.
    pub endpoint: String,
    /// API key sent as the `api_key` query parameter.
    pub api_key: Option<String>,
    /// Workspace shown in the header.
    pub workspace_id: Option<String>,
    /// Rows per table page.
    pub page_size: NonZeroUsize,
    /// Requested startup view; resolved (with redirect) by the router.
    pub default_page: Option<String>,
    /// Directory exports are written to.
    pub export_dir: PathBuf,
    /// HTTP timeout; `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
    /// File tracing output is appended to.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            workspace_id: None,
            page_size: DEFAULT_PAGE_SIZE,
            default_page: None,
            export_dir: PathBuf::from("."),
            request_timeout: None,
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/roidash/roidash.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join("roidash").join("roidash.log"),
        None => PathBuf::from("roidash.log"),
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/roidash/config.toml` on Unix, appropriate path on other platforms.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("roidash").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `ROIDASH_CONFIG` environment variable
/// 3. Default path `~/.config/roidash/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    match default_config_path() {
        Some(default_path) => load_config_file(default_path),
        None => Ok(None),
    }
}

/// Merge config file into defaults to create resolved config.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        endpoint: config.endpoint.unwrap_or(defaults.endpoint),
        api_key: config.api_key.or(defaults.api_key),
        workspace_id: config.workspace_id.or(defaults.workspace_id),
        page_size: config.page_size.unwrap_or(defaults.page_size),
        default_page: config.default_page.or(defaults.default_page),
        export_dir: config.export_dir.unwrap_or(defaults.export_dir),
        request_timeout: config
            .request_timeout_secs
            .map(|secs| Duration::from_secs(secs.get()))
            .or(defaults.request_timeout),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks `ROIDASH_ENDPOINT`, `ROIDASH_API_KEY` and `ROIDASH_WORKSPACE_ID`.
/// Empty values are ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

    if let Some(endpoint) = var(ENDPOINT_ENV) {
        config.endpoint = endpoint;
    }
    if let Some(key) = var(API_KEY_ENV) {
        config.api_key = Some(key);
    }
    if let Some(id) = var(WORKSPACE_ID_ENV) {
        config.workspace_id = Some(id);
    }

    config
}

/// Values given on the command line. `None` leaves the resolved value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--endpoint`
    pub endpoint: Option<String>,
    /// `--api-key`
    pub api_key: Option<String>,
    /// `--workspace-id`
    pub workspace_id: Option<String>,
    /// `--page-size`
    pub page_size: Option<NonZeroUsize>,
    /// `--page`
    pub page: Option<String>,
    /// `--export-dir`
    pub export_dir: Option<PathBuf>,
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(key) = cli.api_key {
        config.api_key = Some(key);
    }
    if let Some(id) = cli.workspace_id {
        config.workspace_id = Some(id);
    }
    if let Some(size) = cli.page_size {
        config.page_size = size;
    }
    if let Some(page) = cli.page {
        config.default_page = Some(page);
    }
    if let Some(dir) = cli.export_dir {
        config.export_dir = dir;
    }

    config
}

/// Run the full chain: file → defaults → env → CLI.
pub fn resolve_config(
    config_path: Option<PathBuf>,
    cli: CliOverrides,
) -> Result<ResolvedConfig, ConfigError> {
    let config_file = load_config_with_precedence(config_path)?;
    let merged = merge_config(config_file);
    let with_env = apply_env_overrides(merged);
    Ok(apply_cli_overrides(with_env, cli))
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
