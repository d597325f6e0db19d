use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use clap::{Parser, Subcommand};
use env_logger::Env;
use tabled::{settings::Style, Table, Tabled};

use acctdash::config::{config_dir, load_config, resolve_output_dir, Config, CONFIG_TEMPLATE};
use acctdash::dashboard::{TableRow, ViewOptions, ViewTree};
use acctdash::error::{DashboardError, Result};
use acctdash::page::{DashboardPage, PageState};
use acctdash::source::{method_url, DataSource, FileSource, HttpSource};
use acctdash::theme::{ThemeMode, ThemeSignal, ThemeSwitch};

const THEME_ENV: &str = "ACCTDASH_THEME";

#[derive(Parser)]
#[command(name = "acctdash")]
#[command(version, about = "Theme-aware accounting dashboard renderer", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.acctdash or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with a template config.toml
    Init,

    /// Fetch dashboard data and write the rendered page
    Render {
        /// Read the payload from a saved JSON file instead of the server
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Custom output file path (default: output_dir/dashboard.html)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Theme to render with (light or dark)
        #[arg(short, long)]
        theme: Option<String>,

        /// Output format (html or json)
        #[arg(short, long, default_value = "html")]
        format: String,

        /// Write both a light and a dark page (html only)
        #[arg(long, conflicts_with = "theme")]
        both_themes: bool,

        /// Open the rendered page with the system default viewer
        #[arg(long)]
        open: bool,
    },

    /// Print the dashboard as terminal tables
    Show {
        /// Read the payload from a saved JSON file instead of the server
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Theme used to resolve status colors (light or dark)
        #[arg(short, long)]
        theme: Option<String>,
    },

    /// Show config and data source information
    Status,
}

#[derive(Clone, Copy)]
enum Format {
    Html,
    Json,
}

impl Format {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(Format::Html),
            "json" => Ok(Format::Json),
            _ => Err(DashboardError::InvalidFormat(value.to_string())),
        }
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Render {
            input,
            output,
            theme,
            format,
            both_themes,
            open,
        } => cmd_render(
            &cfg_dir,
            RenderArgs {
                input,
                output,
                theme,
                format: Format::parse(&format)?,
                both_themes,
                open,
            },
        ),
        Commands::Show { input, theme } => cmd_show(&cfg_dir, input, theme.as_deref()),
        Commands::Status => cmd_status(&cfg_dir),
    }
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    if cfg_dir.exists() {
        return Err(DashboardError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::create_dir_all(cfg_dir.join("output"))?;
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;

    println!("Initialized acctdash config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Point it at your server:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!("  2. Render the dashboard:     acctdash render --open");

    Ok(())
}

fn load_initialized(cfg_dir: &Path) -> Result<Config> {
    if !cfg_dir.exists() {
        return Err(DashboardError::ConfigNotFound(cfg_dir.to_path_buf()));
    }
    load_config(cfg_dir)
}

/// Initial dark-mode reading: the flag, then the environment, then config.
/// A bad flag is an error; a bad env or config value reads as unknown.
fn theme_seed(flag: Option<&str>, config: &Config) -> Result<Option<bool>> {
    if let Some(flag) = flag {
        return ThemeMode::parse(flag)
            .map(|mode| Some(mode.is_dark()))
            .ok_or_else(|| DashboardError::InvalidTheme(flag.to_string()));
    }

    let (origin, value) = match std::env::var(THEME_ENV) {
        Ok(value) if !value.trim().is_empty() => (THEME_ENV, value),
        _ => ("display.theme", config.display.theme.clone()),
    };

    match ThemeMode::parse(&value) {
        Some(mode) => Ok(Some(mode.is_dark())),
        None => {
            log::warn!("unrecognised theme '{value}' from {origin}, using light");
            Ok(None)
        }
    }
}

fn data_source(input: Option<PathBuf>, config: &Config) -> Box<dyn DataSource> {
    match input {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(HttpSource::new(
            &config.source.url,
            &config.source.method,
            config.source.timeout(),
        )),
    }
}

fn view_options(config: &Config) -> ViewOptions {
    ViewOptions {
        today: None,
        date_format: config.display.date_format.clone(),
    }
}

/// Surface an Error page state as a command failure.
fn ensure_loaded(page: &DashboardPage) -> Result<()> {
    match page.state() {
        PageState::Error(reason) => Err(DashboardError::Fetch(reason.clone())),
        _ => Ok(()),
    }
}

struct RenderArgs {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    theme: Option<String>,
    format: Format,
    both_themes: bool,
    open: bool,
}

/// Fetch, build and write the dashboard
fn cmd_render(cfg_dir: &Path, args: RenderArgs) -> Result<()> {
    let config = load_initialized(cfg_dir)?;

    let both_themes = match args.format {
        Format::Html => args.both_themes,
        Format::Json => {
            if args.both_themes {
                log::warn!("--both-themes only applies to html output, ignoring it");
            }
            false
        }
    };

    // both pages start from light; the dark one comes from flipping the switch
    let seed = if both_themes {
        Some(false)
    } else {
        theme_seed(args.theme.as_deref(), &config)?
    };
    let switch = Rc::new(ThemeSwitch::new(seed));
    let signal: Rc<dyn ThemeSignal> = switch.clone();

    let source = data_source(args.input, &config);
    log::info!("rendering from {}", source.describe());
    let page = Rc::new(RefCell::new(DashboardPage::new(
        source,
        signal,
        view_options(&config),
    )));

    if let Format::Json = args.format {
        let mut page = page.borrow_mut();
        page.refresh();
        ensure_loaded(&page)?;
        if let Some(view) = page.view() {
            let json = serde_json::to_string_pretty(view).map_err(std::io::Error::from)?;
            println!("{json}");
        }
        return Ok(());
    }

    let output = match args.output {
        Some(path) => path,
        None => resolve_output_dir(cfg_dir, &config).join("dashboard.html"),
    };
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut written = Vec::new();
    if both_themes {
        DashboardPage::watch_theme(&page);
        page.borrow_mut().refresh();

        let light = themed_path(&output, ThemeMode::Light);
        write_page(&page.borrow(), &light)?;
        written.push(light);

        // the subscription re-fetches with the dark palette
        switch.set_dark(true);
        page.borrow_mut().sync_theme();
        let dark = themed_path(&output, ThemeMode::Dark);
        write_page(&page.borrow(), &dark)?;
        written.push(dark);
    } else {
        page.borrow_mut().refresh();
        write_page(&page.borrow(), &output)?;
        written.push(output);
    }

    for path in &written {
        println!("Wrote {}", path.display());
    }

    ensure_loaded(&page.borrow())?;

    if args.open {
        for path in &written {
            open_path(path)?;
        }
    }
    Ok(())
}

fn write_page(page: &DashboardPage, path: &Path) -> Result<()> {
    fs::write(path, page.html()?)?;
    Ok(())
}

/// `out/dashboard.html` -> `out/dashboard-dark.html`
fn themed_path(path: &Path, mode: ThemeMode) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dashboard");
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("html");
    path.with_file_name(format!("{stem}-{mode}.{ext}"))
}

fn open_path(path: &Path) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(path).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(path).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", path.to_str().unwrap_or("")])
            .spawn()?;
    }
    Ok(())
}

// Table row structs for tabled
#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "METRIC")]
    metric: String,
    #[tabled(rename = "VALUE")]
    value: String,
}

#[derive(Tabled)]
struct InvoiceLine {
    #[tabled(rename = "INVOICE")]
    name: String,
    #[tabled(rename = "CUSTOMER")]
    customer: String,
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "TOTAL")]
    total: String,
    #[tabled(rename = "OUTSTANDING")]
    outstanding: String,
    #[tabled(rename = "STATUS")]
    status: String,
}

/// Print the dashboard as tables
fn cmd_show(cfg_dir: &Path, input: Option<PathBuf>, theme: Option<&str>) -> Result<()> {
    let config = load_initialized(cfg_dir)?;
    let signal: Rc<dyn ThemeSignal> = Rc::new(ThemeSwitch::new(theme_seed(theme, &config)?));

    let mut page = DashboardPage::new(data_source(input, &config), signal, view_options(&config));
    page.refresh();
    ensure_loaded(&page)?;

    if let Some(view) = page.view() {
        print_view(view);
    }
    Ok(())
}

fn print_view(view: &ViewTree) {
    println!("{} - {}", view.header.title, view.header.period);
    println!();

    let kpis: Vec<MetricRow> = view
        .kpis
        .iter()
        .map(|card| MetricRow {
            metric: card.title.to_string(),
            value: card.value.clone(),
        })
        .collect();
    let table = Table::new(kpis).with(Style::rounded()).to_string();
    println!("{table}");

    println!();
    println!("{}", view.stats.period.display);
    let mut stats: Vec<MetricRow> = view
        .stats
        .counters
        .iter()
        .map(|counter| MetricRow {
            metric: counter.label.to_string(),
            value: counter.value.to_string(),
        })
        .collect();
    stats.push(MetricRow {
        metric: "Overdue Invoices".to_string(),
        value: format!("{} ({})", view.overdue.count, view.overdue.total),
    });
    let table = Table::new(stats).with(Style::rounded()).to_string();
    println!("{table}");

    if !view.overdue.has_overdue {
        println!("{}", view.overdue.action.label());
    }

    println!();
    println!("Recent Invoices");
    let mut lines = Vec::new();
    for row in &view.invoices.rows {
        match row {
            TableRow::Invoice(invoice) => lines.push(InvoiceLine {
                name: invoice.name.clone(),
                customer: invoice.customer.clone(),
                date: invoice.date.clone(),
                total: invoice.total.clone(),
                outstanding: invoice.outstanding.clone(),
                status: invoice.status.to_string(),
            }),
            TableRow::Placeholder { message } => println!("{message}"),
        }
    }
    if !lines.is_empty() {
        let table = Table::new(lines).with(Style::rounded()).to_string();
        println!("{table}");
    }
}

/// Show config and data source
fn cmd_status(cfg_dir: &Path) -> Result<()> {
    let config = load_initialized(cfg_dir)?;
    let theme = match theme_seed(None, &config)? {
        Some(true) => ThemeMode::Dark,
        _ => ThemeMode::Light,
    };

    println!("Dashboard Status");
    println!("{}", "-".repeat(50));
    println!("Config directory: {}", cfg_dir.display());
    println!(
        "Data source:      {}",
        method_url(&config.source.url, &config.source.method)
    );
    println!("Timeout:          {}s", config.source.timeout_secs);
    println!("Theme:            {theme}");
    println!("Date format:      {}", config.display.date_format);
    println!(
        "Output directory: {}",
        resolve_output_dir(cfg_dir, &config).display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn themed_path_keeps_directory_and_extension() {
        assert_eq!(
            themed_path(Path::new("out/dashboard.html"), ThemeMode::Dark),
            PathBuf::from("out/dashboard-dark.html")
        );
        assert_eq!(
            themed_path(Path::new("page"), ThemeMode::Light),
            PathBuf::from("page-light.html")
        );
    }

    #[test]
    fn format_names_parse() {
        assert!(matches!(Format::parse("JSON"), Ok(Format::Json)));
        assert!(matches!(
            Format::parse("pdf"),
            Err(DashboardError::InvalidFormat(_))
        ));
    }
}
