//! Live progress display for fetch runs
//!
//! Consumes [`WorkerProgress`] events from the dispatcher and renders them with
//! indicatif. In verbose mode every finished item is also printed as a line,
//! in completion order, above the bar.
//!
//! # Examples
//!
//! ```rust,no_run
//! use fanout_fetcher::cli::{ProgressConfig, ProgressDisplay};
//! use tokio::sync::mpsc;
//!
//! # async fn example() {
//! let (tx, rx) = mpsc::unbounded_channel();
//! let display = ProgressDisplay::new(ProgressConfig::default());
//! let handle = tokio::spawn(display.run(rx, 150));
//!
//! // hand `tx` to the dispatcher; the display ends when the channel closes
//! drop(tx);
//! let tally = handle.await.unwrap();
//! println!("{} items seen", tally.completed);
//! # }
//! ```

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio::sync::mpsc;
use tracing::debug;

use crate::app::{Outcome, WorkerProgress};

/// Configuration for progress display
#[derive(Debug, Clone)]
pub struct ProgressConfig {
    /// Draw a progress bar (only on a terminal)
    pub enable_progress_bar: bool,
    /// Print one line per finished item
    pub show_outcomes: bool,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            enable_progress_bar: true,
            show_outcomes: false,
        }
    }
}

/// Counts gathered from the event stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressTally {
    /// Items that finished, in any state
    pub completed: u64,
    /// Items that finished with a failure
    pub failed: u64,
    /// Workers that reported `Done`
    pub workers_finished: u64,
}

/// Progress display driven by worker events
pub struct ProgressDisplay {
    config: ProgressConfig,
    is_terminal: bool,
}

impl ProgressDisplay {
    /// Create a new progress display with the given configuration
    pub fn new(config: ProgressConfig) -> Self {
        Self {
            config,
            is_terminal: atty::is(atty::Stream::Stderr),
        }
    }

    /// Consume events until every sender is dropped
    pub async fn run(
        self,
        mut events: mpsc::UnboundedReceiver<WorkerProgress>,
        total_items: u64,
    ) -> ProgressTally {
        let bar = self.create_bar(total_items);
        let mut tally = ProgressTally::default();

        while let Some(event) = events.recv().await {
            match event {
                WorkerProgress::ItemCompleted { worker_id, outcome } => {
                    tally.completed += 1;
                    if !outcome.is_success() {
                        tally.failed += 1;
                    }

                    if self.config.show_outcomes {
                        let line = format_outcome_line(worker_id, &outcome);
                        match &bar {
                            Some(bar) => bar.println(line),
                            None => eprintln!("{}", line),
                        }
                    }

                    if let Some(bar) = &bar {
                        bar.inc(1);
                        bar.set_message(format!("{} failed", tally.failed));
                    }
                }
                WorkerProgress::WorkerFinished { report } => {
                    tally.workers_finished += 1;
                    debug!(
                        "Worker #{} finished: {} items, {} failed",
                        report.worker_id, report.items_processed, report.failures
                    );
                }
            }
        }

        if let Some(bar) = bar {
            bar.finish_and_clear();
        }

        tally
    }

    fn create_bar(&self, total_items: u64) -> Option<ProgressBar> {
        if !self.config.enable_progress_bar || !self.is_terminal {
            return None;
        }

        let bar = ProgressBar::with_draw_target(Some(total_items), ProgressDrawTarget::stderr());
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-");
        bar.set_style(style);
        Some(bar)
    }
}

/// `#<id> - <label> - <payload> - worker #<n>`
pub fn format_outcome_line(worker_id: u32, outcome: &Outcome) -> String {
    format!(
        "#{} - {} - {} - worker #{}",
        outcome.item_id,
        outcome.status.label(),
        outcome.payload,
        worker_id
    )
}
