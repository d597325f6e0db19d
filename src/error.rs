use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Config directory not found at {0}. Run 'acctdash init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Failed to fetch dashboard data: {0}")]
    Fetch(String),

    #[error("Failed to render dashboard: {0}")]
    Render(#[from] askama::Error),

    #[error("Invalid theme '{0}'. Use 'light' or 'dark'.")]
    InvalidTheme(String),

    #[error("Invalid format '{0}'. Use 'html' or 'json'.")]
    InvalidFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
