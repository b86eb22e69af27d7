use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;

use parley_client::{HttpBackend, check_health};
use parley_core::{Config, init_logging};
use parley_ui::App;
use parley_ui::app::event_loop;

/// Parley - a terminal chat client for a retrieval-backed chat backend
#[derive(Parser, Debug)]
#[command(name = "parley")]
#[command(about = "Chat with a document-aware backend from your terminal", long_about = None)]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to parley.toml (default: ./parley.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the interactive chat session
    Start {
        /// Backend base URL, overrides the config file
        #[arg(short, long, value_name = "URL")]
        url: Option<String>,
    },
    /// Probe the backend's health endpoint and exit
    Health,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(|| PathBuf::from("parley.toml"));
    let config = load_or_create_config(&config_path)?;

    if cli.verbose {
        println!("{} Using config: {}", "Info:".blue().bold(), config_path.display());
        println!("{} Backend: {}", "Info:".blue().bold(), config.backend.base_url.cyan());
    }

    match cli.command {
        Commands::Start { url } => cmd_start(config, url, cli.verbose)?,
        Commands::Health => cmd_health(config)?,
    }

    Ok(())
}

/// Load config from file or create from example
fn load_or_create_config(path: &Path) -> Result<Config> {
    if path.exists() {
        Config::from_file(path).map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    } else {
        println!("{} Config not found at {}", "Warning:".yellow().bold(), path.display());
        println!("{} Creating config from example...", "Info:".blue().bold());

        std::fs::write(path, Config::example()).context("Failed to create config")?;

        println!(
            "{} Created config at {}. Edit it if your backend is not on the default address.",
            "Success:".green().bold(),
            path.display()
        );

        Config::from_str(Config::example()).map_err(|e| anyhow::anyhow!("Invalid example config: {}", e))
    }
}

/// Start the interactive chat session
fn cmd_start(mut config: Config, url: Option<String>, verbose: bool) -> Result<()> {
    if let Some(url) = url {
        config.backend.base_url = url;
    }

    // The guard must outlive the event loop so buffered log lines flush
    let _log_guard = init_logging(Some(config.logging.clone()))
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    if verbose {
        println!("{} Connecting to {}", "Info:".blue().bold(), config.backend.base_url.cyan());
    }

    let base_url = config.backend.base_url.clone();
    let backend = Arc::new(HttpBackend::new(base_url.clone()));
    let mut app = App::new(backend, base_url);

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(event_loop::run(&mut app)).context("Terminal session failed")?;

    Ok(())
}

/// Probe the backend health endpoint
fn cmd_health(config: Config) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let report = runtime
        .block_on(check_health(&config.backend.base_url, Duration::from_secs(5)))
        .map_err(|e| anyhow::anyhow!("Health check failed: {}", e))?;

    println!("{}", "Parley Health".green().bold().underline());
    println!();
    println!("  Backend: {}", config.backend.base_url.cyan());

    if report.healthy {
        println!("  Status:  {}", "healthy".green().bold());
        println!("  Latency: {} ms", report.latency_ms.to_string().cyan());
        Ok(())
    } else {
        println!("  Status:  {}", "unhealthy".red().bold());
        if let Some(error) = &report.error {
            println!("  Error:   {}", error);
        }
        std::process::exit(1);
    }
}
