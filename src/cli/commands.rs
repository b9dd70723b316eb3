//! Command handlers for the CLI
//!
//! Each handler receives already-parsed arguments plus the loaded
//! configuration, performs its work and prints user-facing output to stdout.

use std::path::PathBuf;

use tokio::sync::mpsc;
use tracing::{info, warn};

use super::args::{ConfigAction, ConfigArgs, FetchArgs};
use super::progress::{ProgressConfig, ProgressDisplay};
use crate::app::{Dispatcher, RunSummary};
use crate::config::AppConfig;
use crate::errors::Result;

/// Output switches taken from the global flags
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputMode {
    /// Suppress the progress bar and timing line
    pub quiet: bool,
    /// Print a line for every finished item
    pub verbose: bool,
}

/// Handle the fetch command
///
/// Item failures do not make this return an error; only configuration and
/// dispatch errors do.
pub async fn handle_fetch(args: FetchArgs, config: AppConfig, output: OutputMode) -> Result<()> {
    let dispatch_config = args.apply_to(config.fetch.clone())?;
    let client_config = config.client_config_for(dispatch_config.worker_count);

    info!(
        "Fetching {} items from {}{} with {} workers",
        dispatch_config.item_count,
        dispatch_config.base_url,
        dispatch_config.path_template,
        dispatch_config.worker_count
    );

    let item_count = u64::from(dispatch_config.item_count);
    let mut dispatcher = Dispatcher::with_client_config(dispatch_config, &client_config)?;

    let show_outcomes = output.verbose && !output.quiet;
    let display_task = if args.wants_progress(output.quiet) || show_outcomes {
        let (tx, rx) = mpsc::unbounded_channel();
        dispatcher = dispatcher.with_progress(tx);

        let display = ProgressDisplay::new(ProgressConfig {
            enable_progress_bar: args.wants_progress(output.quiet),
            show_outcomes,
        });
        Some(tokio::spawn(display.run(rx, item_count)))
    } else {
        None
    };

    let summary = dispatcher.run().await?;

    if let Some(task) = display_task {
        if let Err(e) = task.await {
            warn!("Progress display terminated unexpectedly: {}", e);
        }
    }

    print_summary(&summary, args.show_failures, output.quiet);
    Ok(())
}

fn print_summary(summary: &RunSummary, show_failures: bool, quiet: bool) {
    if !quiet {
        println!("{}", summary.timing_line());
    }

    print!("{}", summary.report.render(show_failures));

    if !quiet && summary.report.failure_count() > 0 && !show_failures {
        let breakdown: Vec<String> = summary
            .report
            .failures_by_label()
            .into_iter()
            .map(|(label, count)| format!("{} {}", count, label))
            .collect();
        eprintln!(
            "{} items failed ({}); rerun with --show-failures for details",
            summary.report.failure_count(),
            breakdown.join(", ")
        );
    }
}

/// Handle the config command
pub async fn handle_config(args: ConfigArgs, config_override: Option<PathBuf>) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            let config = AppConfig::load(config_override).await?;
            print!("{}", config.to_toml()?);
        }
        ConfigAction::Init { force, path } => {
            let path = match path.or(config_override) {
                Some(path) => path,
                None => AppConfig::default_config_path()?,
            };
            AppConfig::write_default(&path, force).await?;
            println!("Created default configuration file:");
            println!("   {}", path.display());
        }
    }
    Ok(())
}
