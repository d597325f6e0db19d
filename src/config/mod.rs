use crate::error::{DashboardError, Result};
use crate::dashboard::DEFAULT_DATE_FORMAT;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_METHOD: &str =
    "simple_accounting.simple_accounting.page.accounting_home.accounting_home.get_dashboard_data";

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub source: SourceSettings,
    #[serde(default)]
    pub display: DisplaySettings,
    #[serde(default)]
    pub output: OutputSettings,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SourceSettings {
    pub url: String,
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl SourceSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct DisplaySettings {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            date_format: default_date_format(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct OutputSettings {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

fn default_method() -> String {
    DEFAULT_METHOD.to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_theme() -> String {
    "light".to_string()
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_output_dir() -> String {
    "~/.acctdash/output".to_string()
}

/// Get the config directory path (~/.acctdash/)
pub fn config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "acctdash") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    let home = dirs_home().ok_or_else(|| {
        DashboardError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".acctdash"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Output directory from config; relative paths hang off the config dir.
pub fn resolve_output_dir(cfg_dir: &Path, config: &Config) -> PathBuf {
    let dir = expand_path(&config.output.output_dir);
    if dir.is_absolute() {
        dir
    } else {
        cfg_dir.join(dir)
    }
}

/// Load the main config.toml
pub fn load_config(cfg_dir: &Path) -> Result<Config> {
    let path = cfg_dir.join("config.toml");
    if !path.exists() {
        return Err(DashboardError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| DashboardError::ConfigParse { path, source: e })
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[source]
url = "http://localhost:8000"
method = "simple_accounting.simple_accounting.page.accounting_home.accounting_home.get_dashboard_data"
timeout_secs = 10

[display]
theme = "light"          # light | dark (ACCTDASH_THEME overrides)
date_format = "%m-%d-%Y" # strftime pattern for invoice dates

[output]
output_dir = "~/.acctdash/output"
"#;
