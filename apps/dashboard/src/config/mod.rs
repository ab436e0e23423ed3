use crate::domain::{OperationMode, TimeRange};
use color_eyre::eyre::{eyre, Result};
use dotenv::dotenv;
use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api/v1";
pub const DEFAULT_DATABASE_NAME: &str = "dashboard.db";
pub const DEFAULT_LOG_FILE: &str = "dashboard.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base: String,
    pub database_url: String,
    pub mode: OperationMode,
    pub log_file: PathBuf,
    pub debug: bool,
    pub initial_range: TimeRange,
}

/// Loads `.env`, then reads the dashboard settings from the environment.
pub fn init_app_config() -> Result<AppConfig> {
    dotenv().ok();
    let base_dir = env::current_dir()?;
    AppConfig::from_lookup(&base_dir, |key| env::var(key).ok())
}

impl AppConfig {
    /// Builds the config from any key lookup; relative database paths resolve against `base_dir`.
    pub fn from_lookup(base_dir: &Path, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_base = lookup("CLIMATE_API_BASE")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let db_name = lookup("DATABASE_NAME").unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string());
        let database_url = if db_name.starts_with("sqlite:") {
            db_name
        } else {
            database_url_for(&base_dir.join(db_name))?
        };

        let mode = match lookup("OPERATION_MODE") {
            Some(raw) => OperationMode::parse(&raw)
                .ok_or_else(|| eyre!("Unknown OPERATION_MODE '{raw}' (expected simulated or live)"))?,
            None => OperationMode::default(),
        };

        let log_file = lookup("DASHBOARD_LOG_FILE")
            .map_or_else(|| base_dir.join(DEFAULT_LOG_FILE), PathBuf::from);

        let debug = lookup("DEBUG").is_some_and(|value| is_truthy(&value));

        let initial_range = lookup("CHART_RANGE").map_or(TimeRange::Month, |raw| TimeRange::parse(&raw));

        Ok(Self {
            api_base,
            database_url,
            mode,
            log_file,
            debug,
            initial_range,
        })
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// sqlx wants `sqlite:///abs/path.db` for absolute paths and `sqlite://rel/path.db` otherwise.
fn database_url_for(path: &Path) -> Result<String> {
    let path_str = path
        .to_str()
        .ok_or_else(|| eyre!("Invalid database path"))?;
    let clean_path = path_str.trim_start_matches('/');

    if path.is_absolute() {
        Ok(format!("sqlite:///{clean_path}"))
    } else {
        Ok(format!("sqlite://{clean_path}"))
    }
}
