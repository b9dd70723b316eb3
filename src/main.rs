//! fanout_fetcher CLI application
//!
//! Command-line entry point: loads configuration, runs one dispatch and
//! prints the ordered report.

use std::process;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use fanout_fetcher::cli::{handle_config, handle_fetch, Cli, Commands, GlobalArgs, OutputMode};
use fanout_fetcher::config::AppConfig;
use fanout_fetcher::constants::logging;
use fanout_fetcher::errors::Result;

#[tokio::main]
async fn main() {
    // Initialize program
    let result = run().await;

    // Handle any errors that occurred
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    // Parse command line arguments
    let cli = Cli::parse_args();
    let cli_level = cli.log_level();

    match cli.command {
        Commands::Fetch(args) => {
            let config = AppConfig::load(cli.global.config.clone()).await?;
            init_logging(&cli.global, cli_level, &config.logging.level);
            info!("fanout_fetcher v{} starting", env!("CARGO_PKG_VERSION"));

            let output = OutputMode {
                quiet: cli.global.quiet,
                verbose: cli.global.verbose || cli.global.very_verbose,
            };
            handle_fetch(args, config, output).await
        }
        Commands::Config(args) => {
            init_logging(&cli.global, cli_level, logging::DEFAULT_LOG_LEVEL);
            handle_config(args, cli.global.config.clone()).await
        }
    }
}

/// Initialize logging based on CLI verbosity settings
fn init_logging(
    global: &GlobalArgs,
    cli_level: Option<tracing::Level>,
    configured_level: &str,
) {
    let level = cli_level
        .map(|level| level.to_string().to_lowercase())
        .unwrap_or_else(|| configured_level.to_string());

    // Create environment filter
    let mut filter = EnvFilter::from_default_env();
    match format!("fanout_fetcher={}", level).parse() {
        Ok(directive) => filter = filter.add_directive(directive),
        Err(e) => eprintln!("Ignoring invalid log level '{}': {}", level, e),
    }

    // Initialize subscriber
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(global.very_verbose) // Show levels only in very verbose mode
        .init();

    if global.very_verbose {
        info!("Very verbose logging enabled");
    } else if global.verbose {
        info!("Verbose logging enabled");
    }
}
