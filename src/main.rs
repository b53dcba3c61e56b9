//! Teamlens - meeting transcript and developer analytics service
//!
//! Serves a tool-dispatch HTTP API with two sides: meeting transcript
//! analysis (heuristic action items, summary, topics, sentiment; persisted
//! to flat JSON files) and GitHub developer analytics (fetched fresh per
//! request).

mod analytics;
mod cli;
mod config;
mod error;
mod github;
mod heuristics;
mod models;
mod server;
mod store;
mod tools;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

use cli::Args;
use config::Config;
use github::GithubClient;
use store::RecordStore;
use tools::ToolDispatcher;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args);

    info!("Teamlens v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args).await {
        error!("Startup failed: {}", e);
        eprintln!("\nError: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .teamlens.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".teamlens.toml");

    if path.exists() {
        eprintln!("⚠️  .teamlens.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .teamlens.toml")?;

    println!("✅ Created .teamlens.toml with default settings.");
    println!("   Edit it to customize the bind address, data directory, and GitHub access.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level())
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Wire up the store, the GitHub client, and the HTTP adapter, then serve.
async fn run(args: Args) -> Result<()> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let store = RecordStore::load(&config.storage.data_dir)?;
    let github = GithubClient::new(&config.github)?;
    let dispatcher = Arc::new(ToolDispatcher::new(store, github));

    let addr: SocketAddr = format!("{}:{}", config.server.bind, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "Invalid bind address: {}:{}",
                config.server.bind, config.server.port
            )
        })?;

    server::serve(addr, dispatcher).await
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .teamlens.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
