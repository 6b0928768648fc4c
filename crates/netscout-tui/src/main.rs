//! `netscout`: terminal dashboard for hosts discovered on the local network.
//!
//! Built on [ratatui](https://ratatui.rs). The dashboard renders snapshots
//! published by `netscout-core`'s [`DashboardController`]; a background
//! bridge task forwards every change into the TUI action loop.
//!
//! Logs are written to a file (default `/tmp/netscout.log`) to avoid
//! corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, config layering, tracing setup, panic
//! hooks, and app launch.

mod action;
mod app;
mod component;
mod event;
mod screens;
mod state_bridge;
mod terminal_theme;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use netscout_config::Config;
use netscout_core::{DashboardController, HttpScanner};

use crate::app::App;
use crate::terminal_theme::TerminalThemeSink;

/// Terminal dashboard for scanning and listing devices on the local network.
#[derive(Parser, Debug)]
#[command(name = "netscout", version, about)]
struct Cli {
    /// Discovery service root URL (e.g., http://localhost:8000)
    #[arg(short = 'u', long, env = "NETSCOUT_URL")]
    backend_url: Option<String>,

    /// Scan request timeout in seconds (default: wait indefinitely)
    #[arg(short = 't', long, env = "NETSCOUT_TIMEOUT")]
    timeout: Option<u64>,

    /// Config file path (defaults to the platform config directory)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Log file path (defaults to /tmp/netscout.log)
    #[arg(long, default_value = "/tmp/netscout.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

/// Set up file-based tracing. Nothing may log to stdout/stderr while the
/// TUI owns the terminal. The returned guard must be held for the lifetime
/// of the application so logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "netscout={log_level},netscout_core={log_level},netscout_api={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("netscout.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Defaults < config file < `NETSCOUT_*` env < CLI flags.
fn effective_config(cli: &Cli) -> Result<Config> {
    let mut cfg = match &cli.config {
        Some(path) => netscout_config::load_config_from(path)?,
        None => netscout_config::load_config()?,
    };

    if let Some(url) = &cli.backend_url {
        cfg.backend.url.clone_from(url);
    }
    if let Some(secs) = cli.timeout {
        cfg.backend.timeout_secs = Some(secs);
    }

    Ok(cfg)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = effective_config(&cli)?;

    if cli.print_config {
        print!("{}", netscout_config::render_config(&cfg)?);
        return Ok(());
    }

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file; hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    let scan_config = netscout_config::to_scan_config(&cfg)?;
    let prefs = netscout_config::to_ui_preferences(&cfg);
    let scanner = HttpScanner::from_config(&scan_config)?;

    info!(
        backend = %scan_config.url,
        timeout = ?scan_config.timeout,
        "starting netscout"
    );

    let controller = DashboardController::new(
        Arc::new(scanner),
        Arc::new(TerminalThemeSink::stdout()),
        prefs,
    );
    let mut app = App::new(controller, scan_config.url.as_str());
    app.run().await?;

    Ok(())
}
