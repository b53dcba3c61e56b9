//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// Teamlens - meeting transcript and developer analytics service
///
/// Serves a tool-dispatch HTTP API that analyzes meeting transcripts
/// (action items, summary, topics, sentiment) and aggregates GitHub
/// developer data.
///
/// Examples:
///   teamlens
///   teamlens --port 8080 --data-dir ./data
///   teamlens --config ./teamlens.toml
///   teamlens --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to configuration file
    ///
    /// If not specified, looks for .teamlens.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory for the meeting data files
    #[arg(short, long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Bind address for the HTTP server
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<String>,

    /// Port for the HTTP server
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// GitHub API token for authenticated requests
    ///
    /// Raises the unauthenticated rate limit. Read-only access is enough.
    #[arg(long, env = "GITHUB_TOKEN", value_name = "TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .teamlens.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if let Some(ref bind) = self.bind {
            if bind.parse::<std::net::IpAddr>().is_err() {
                return Err(format!("Invalid bind address: {}", bind));
            }
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
