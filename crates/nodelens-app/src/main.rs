mod app;
mod command;
mod event;
mod keybindings;
mod view;

use std::io;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use nodelens_config::AppConfig;

#[derive(Parser, Debug)]
#[command(
    name = "nodelens",
    version,
    about = "Read-only terminal dashboard for cluster node groups and workloads"
)]
struct Cli {
    /// Cache TTL in seconds
    #[arg(long)]
    ttl: Option<u64>,
    /// Disable caching entirely
    #[arg(long)]
    no_cache: bool,
    /// Cache directory
    #[arg(long)]
    cache_dir: Option<PathBuf>,
    /// Log level: debug, info, warn, error
    #[arg(long)]
    log_level: Option<String>,
    /// Log directory
    #[arg(long)]
    log_dir: Option<PathBuf>,
    /// Alternate config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => AppConfig::load(),
    };
    config.apply_env();
    apply_cli(&mut config, &cli);

    setup_logging(&config);

    install_panic_hook();
    terminal::enable_raw_mode().context("terminal does not support raw mode")?;
    let _guard = RawModeGuard;
    execute!(io::stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = app::run(&config, &mut terminal).await;

    execute!(io::stdout(), LeaveAlternateScreen)?;
    result
}

fn apply_cli(config: &mut AppConfig, cli: &Cli) {
    if let Some(ttl) = cli.ttl {
        config.cache.ttl_secs = ttl;
    }
    if cli.no_cache {
        config.cache.enabled = false;
    }
    if let Some(dir) = &cli.cache_dir {
        config.cache.dir = Some(dir.display().to_string());
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(dir) = &cli.log_dir {
        config.logging.dir = Some(dir.display().to_string());
    }
}

/// stdout belongs to the TUI, so tracing writes to a file. Any logging
/// setup failure leaves the subscriber uninstalled rather than aborting
/// startup.
fn setup_logging(config: &AppConfig) {
    let dir = config.logging.resolve_dir();
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("Warning: cannot create log dir {}: {e}", dir.display());
        return;
    }
    let path = dir.join("nodelens.log");
    let file = match std::fs::File::create(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: cannot open log file {}: {e}", path.display());
            return;
        }
    };

    // The config surface accepts `warning`; tracing's directive is `warn`.
    let level = match config.logging.level.as_str() {
        "warning" => "warn",
        other => other,
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    tracing::info!("logging to {}", path.display());
}

/// Raw mode must be released on every exit path, including early `?`
/// returns between setup and the run loop.
struct RawModeGuard;

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}
