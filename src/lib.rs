pub mod config;
pub mod dashboard;
pub mod error;
pub mod html;
pub mod page;
pub mod source;
pub mod theme;

pub use config::Config;
pub use dashboard::{build_view, build_view_with, DashboardPayload, ViewOptions, ViewTree};
pub use error::{DashboardError, Result};
pub use page::{DashboardPage, PageState};
pub use source::{DataSource, FileSource, HttpSource};
pub use theme::{resolve_theme, Palette, ThemeMode, ThemeSignal, ThemeSwitch};
