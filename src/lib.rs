//! emsclock library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod models;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use tracing_subscriber::EnvFilter;

/// Central command dispatcher
pub async fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init { .. } => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::In { .. } => cli::commands::clock_in::handle(&cli.command, cfg).await,
        Commands::Out { .. } => cli::commands::clock_out::handle(&cli.command, cfg).await,
        Commands::Status => cli::commands::status::handle(cfg).await,
        Commands::Sync => cli::commands::sync::handle(cfg).await,
        Commands::Watch => cli::commands::watch::handle(cfg).await,
        Commands::List { .. } => cli::commands::list::handle(&cli.command, cfg).await,
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg).await,
        Commands::Employees => cli::commands::employees::handle(cfg).await,
        Commands::Departments => cli::commands::departments::handle(cfg).await,
        Commands::Leave { .. } => cli::commands::leave::handle(&cli.command, cfg).await,
    }
}

/// Entry point used by main.rs
pub async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    init_tracing();

    // Load config once, then apply command-line overrides.
    let mut cfg = Config::load();
    if let Some(custom_db) = &cli.db {
        cfg.state_db = custom_db.clone();
    }
    if let Some(api) = &cli.api {
        cfg.api_base_url = api.clone();
    }

    dispatch(&cli, &cfg).await
}

/// Diagnostics go to stderr and stay out of command output. RUST_LOG
/// opens them up, default is warnings only.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
