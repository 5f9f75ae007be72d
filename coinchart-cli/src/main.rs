//! CoinChart — browse CoinGecko assets and chart their USD price.
//!
//! Options:
//! - `--config` TOML file (defaults to `<config_dir>/coinchart/config.toml`)
//! - `--base-url`, `--timeout-secs`, `--log-level` override the file

use anyhow::{Context, Result};
use clap::Parser;
use coinchart_cli::config::{AppConfig, Overrides};
use coinchart_cli::interrupt::install_interrupt_handler;
use coinchart_cli::logging::init_logging;
use coinchart_cli::{Menu, Session, TerminalPrompt};
use coinchart_core::data::{CoinGeckoProvider, MarketDataProvider};
use coinchart_tui::TerminalPresenter;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "coinchart",
    version,
    about = "CoinChart — interactive cryptocurrency price charts in the terminal"
)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base URL of the CoinGecko-compatible API.
    #[arg(long)]
    base_url: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Log filter directive (e.g. `info`, `coinchart_core=debug`).
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let overrides = Overrides {
        base_url: cli.base_url,
        timeout_secs: cli.timeout_secs,
        log_level: cli.log_level,
    };
    let config = AppConfig::load(cli.config.as_deref(), &overrides)?;
    let _log_guard = init_logging(&config.logging)?;
    install_interrupt_handler()?;

    let provider = CoinGeckoProvider::with_timeout(&config.api.base_url, config.api.timeout())
        .context("failed to set up the HTTP client")?;
    info!(
        provider = provider.name(),
        base_url = provider.base_url(),
        timeout_secs = config.api.timeout_secs,
        "starting"
    );

    let mut presenter = TerminalPresenter::default();
    let mut prompt = TerminalPrompt::new();
    let mut stdout = std::io::stdout();
    let mut session = Session::new();

    let exit = Menu {
        provider: &provider,
        presenter: &mut presenter,
        prompt: &mut prompt,
        out: &mut stdout,
    }
    .run(&mut session)?;

    info!(?exit, "finished");
    Ok(())
}
