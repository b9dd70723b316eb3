//! Command-line argument parsing for fanout_fetcher
//!
//! This module defines the CLI structure using clap derive macros: one
//! `fetch` command that runs a dispatch, and `config` commands for inspecting
//! and creating the configuration file.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::app::DispatchConfig;
use crate::errors::ConfigResult;

/// fanout_fetcher - fetch many resources through a bounded worker pool
#[derive(Parser, Debug)]
#[command(
    name = "fanout_fetcher",
    version,
    about = "Fetch many independent HTTP resources with a fixed number of concurrent workers",
    long_about = "Fetches items 1..=N from an HTTP API using a pool of workers that drain a shared queue.
Every item ends as an outcome; failures never stop the run. Results are printed in item order."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Enable verbose logging and per-item progress lines
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch items and print the ordered report
    Fetch(FetchArgs),

    /// Inspect or create the configuration file
    Config(ConfigArgs),
}

/// Arguments for the fetch command
///
/// Every value left unset falls back to the configuration file, then to the
/// environment, then to the built-in default.
#[derive(Args, Debug, Clone, Default)]
pub struct FetchArgs {
    /// Base URL of the remote API
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Resource path template containing {id}
    #[arg(long, value_name = "TEMPLATE")]
    pub path_template: Option<String>,

    /// Number of items to fetch (items 1..=N)
    #[arg(short = 'n', long, value_name = "N")]
    pub items: Option<u32>,

    /// Per-request deadline in seconds (fractions allowed)
    #[arg(short = 't', long, value_name = "SECONDS")]
    pub timeout: Option<f64>,

    /// Number of concurrent workers
    #[arg(short = 'w', long, value_name = "N", allow_negative_numbers = true)]
    pub workers: Option<i64>,

    /// Use a single worker
    #[arg(long, conflicts_with_all = ["workers", "unbounded"])]
    pub sequential: bool,

    /// Use one worker per item
    #[arg(long, conflicts_with = "workers")]
    pub unbounded: bool,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Also print failed items after the report
    #[arg(long)]
    pub show_failures: bool,
}

/// Arguments for configuration management
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,

        /// Where to write (defaults to --config or the user config directory)
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Logging level requested by the verbosity flags, if any
    pub fn log_level(&self) -> Option<tracing::Level> {
        if self.global.quiet {
            Some(tracing::Level::ERROR)
        } else if self.global.very_verbose {
            Some(tracing::Level::DEBUG)
        } else if self.global.verbose {
            Some(tracing::Level::INFO)
        } else {
            None
        }
    }
}

impl FetchArgs {
    /// Layer the flags given on the command line over `config`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a zero or negative worker count
    /// or a non-positive timeout.
    pub fn apply_to(&self, mut config: DispatchConfig) -> ConfigResult<DispatchConfig> {
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }

        if let Some(template) = &self.path_template {
            config.path_template = template.clone();
        }

        if let Some(items) = self.items {
            config.item_count = items;
        }

        if let Some(secs) = self.timeout {
            config.per_call_timeout = DispatchConfig::timeout_from_secs(secs)?;
        }

        if let Some(workers) = self.workers {
            config.worker_count = DispatchConfig::worker_count_from_signed(workers)?;
        }

        if self.sequential {
            config = config.sequential();
        } else if self.unbounded {
            config = config.unbounded();
        }

        Ok(config)
    }

    /// Whether a progress bar should be drawn
    pub fn wants_progress(&self, quiet: bool) -> bool {
        !self.no_progress && !quiet
    }
}
