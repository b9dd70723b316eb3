//! Dispatch orchestration
//!
//! The dispatcher owns the worker pool for one run. It seeds the work queue,
//! starts exactly `worker_count` workers on the tokio runtime, joins every
//! handle and hands the collected outcomes to the result aggregator.
//!
//! # Architecture
//!
//! - [`config`] - Run parameters, presets and validation
//! - [`stats`] - The summary returned once every worker has finished
//!
//! # Examples
//!
//! ```rust,no_run
//! use fanout_fetcher::app::{DispatchConfig, Dispatcher};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DispatchConfig::default()
//!     .with_item_count(20)
//!     .with_timeout(Duration::from_millis(500))
//!     .with_worker_count(4);
//!
//! let summary = Dispatcher::new(config)?.run().await?;
//! for line in summary.report.success_lines() {
//!     println!("{}", line);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod stats;

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::app::client::{ClientConfig, FetchClient};
use crate::app::queue::WorkQueue;
use crate::app::report::RunReport;
use crate::app::sink::OutcomeSink;
use crate::app::worker::{FetchWorker, WorkerProgress};
use crate::errors::{DispatchError, DispatchResult};

pub use config::DispatchConfig;
pub use stats::RunSummary;

/// Runs one bounded-concurrency fetch over a fixed set of items
#[derive(Debug)]
pub struct Dispatcher {
    config: DispatchConfig,
    client: Arc<FetchClient>,
    progress_tx: Option<mpsc::UnboundedSender<WorkerProgress>>,
}

impl Dispatcher {
    /// Create a dispatcher with a default HTTP client sized for the pool
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::Config` if the configuration is invalid and
    /// `DispatchError::Client` if the HTTP client cannot be built.
    pub fn new(config: DispatchConfig) -> DispatchResult<Self> {
        let client_config = ClientConfig::default().sized_for(config.worker_count);
        Self::with_client_config(config, &client_config)
    }

    /// Create a dispatcher with custom HTTP client settings
    pub fn with_client_config(
        config: DispatchConfig,
        client_config: &ClientConfig,
    ) -> DispatchResult<Self> {
        config.validate()?;
        let client = FetchClient::with_config(client_config, config.target()?)?;
        Ok(Self {
            config,
            client: Arc::new(client),
            progress_tx: None,
        })
    }

    /// Forward worker progress events to the given channel
    pub fn with_progress(mut self, progress_tx: mpsc::UnboundedSender<WorkerProgress>) -> Self {
        self.progress_tx = Some(progress_tx);
        self
    }

    /// Configuration this dispatcher runs with
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Run every item to an outcome and return the ordered summary
    ///
    /// Returns only after every worker has finished. The progress channel, if
    /// any, is closed when this returns.
    ///
    /// # Errors
    ///
    /// - `DispatchError::WorkerPanic` if a worker task did not complete
    /// - `DispatchError::OutcomeCountMismatch` if the sink does not hold
    ///   exactly one outcome per item
    pub async fn run(self) -> DispatchResult<RunSummary> {
        let started_at = Utc::now();
        let start = Instant::now();
        let worker_count = self.config.worker_count;
        let expected = self.config.item_count as usize;

        info!(
            "Dispatching {} items across {} workers (deadline {:?})",
            expected, worker_count, self.config.per_call_timeout
        );

        let queue = Arc::new(WorkQueue::seeded(self.config.item_count));
        let sink = OutcomeSink::with_capacity(expected);

        let mut handles = Vec::with_capacity(worker_count);
        for worker_id in (1..).take(worker_count) {
            let mut worker = FetchWorker::new(
                worker_id,
                Arc::clone(&queue),
                sink.clone(),
                Arc::clone(&self.client),
                self.config.per_call_timeout,
            );
            if let Some(tx) = &self.progress_tx {
                worker = worker.with_progress(tx.clone());
            }

            handles.push((worker_id, tokio::spawn(worker.run())));
        }
        drop(self.progress_tx);

        // Join every handle before judging the run so no task outlives it
        let mut worker_reports = Vec::with_capacity(worker_count);
        let mut failed_worker = None;
        for (worker_id, handle) in handles {
            match handle.await {
                Ok(report) => worker_reports.push(report),
                Err(e) => {
                    error!("Worker #{} terminated unexpectedly: {}", worker_id, e);
                    failed_worker.get_or_insert(worker_id);
                }
            }
        }

        if let Some(worker_id) = failed_worker {
            return Err(DispatchError::WorkerPanic { worker_id });
        }

        let outcomes = sink.drain();
        if outcomes.len() != expected {
            error!(
                "Collected {} outcomes for {} items",
                outcomes.len(),
                expected
            );
            return Err(DispatchError::OutcomeCountMismatch {
                expected,
                actual: outcomes.len(),
            });
        }

        let report = RunReport::from_outcomes(outcomes);
        let elapsed = start.elapsed();
        info!(
            "Dispatch finished in {:.3}s: {} succeeded, {} failed",
            elapsed.as_secs_f64(),
            report.success_count(),
            report.failure_count()
        );

        Ok(RunSummary {
            report,
            worker_reports,
            elapsed,
            started_at,
            worker_count,
            item_count: self.config.item_count,
        })
    }
}

/// Validate `config`, run it to completion and return the summary
pub async fn dispatch(config: DispatchConfig) -> DispatchResult<RunSummary> {
    Dispatcher::new(config)?.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> DispatchConfig {
        DispatchConfig::default()
            .with_base_url(server.uri())
            .with_path_template("/api/v2/pokemon/{id}")
            .with_timeout(Duration::from_secs(2))
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let result = Dispatcher::new(DispatchConfig::default().with_worker_count(0));
        assert!(matches!(result, Err(DispatchError::Config(_))));
    }

    #[tokio::test]
    async fn test_run_collects_every_item() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"name": "x"})))
            .expect(6)
            .mount(&server)
            .await;

        let summary = Dispatcher::new(config_for(&server).with_item_count(6).with_worker_count(3))
            .unwrap()
            .run()
            .await
            .unwrap();

        assert_eq!(summary.report.total(), 6);
        assert_eq!(summary.report.success_count(), 6);
        assert_eq!(summary.worker_reports.len(), 3);
        let processed: u64 = summary.worker_reports.iter().map(|r| r.items_processed).sum();
        assert_eq!(processed, 6);
    }

    #[tokio::test]
    async fn test_more_workers_than_items() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"name": "x"})))
            .mount(&server)
            .await;

        let summary = Dispatcher::new(config_for(&server).with_item_count(2).with_worker_count(5))
            .unwrap()
            .run()
            .await
            .unwrap();

        assert_eq!(summary.report.total(), 2);
        assert_eq!(summary.worker_reports.len(), 5);
        assert!(summary.idle_workers() >= 3);
    }

    #[tokio::test]
    async fn test_empty_run() {
        let server = MockServer::start().await;
        let summary = dispatch(config_for(&server).with_item_count(0))
            .await
            .unwrap();

        assert_eq!(summary.report.total(), 0);
        assert_eq!(summary.item_count, 0);
    }

    #[tokio::test]
    async fn test_progress_channel_closes_after_run() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"name": "x"})))
            .mount(&server)
            .await;

        let (tx, mut rx) = mpsc::unbounded_channel();
        Dispatcher::new(config_for(&server).with_item_count(3).with_worker_count(2))
            .unwrap()
            .with_progress(tx)
            .run()
            .await
            .unwrap();

        let mut completed = 0;
        let mut finished = 0;
        while let Some(event) = rx.recv().await {
            match event {
                WorkerProgress::ItemCompleted { .. } => completed += 1,
                WorkerProgress::WorkerFinished { .. } => finished += 1,
            }
        }
        assert_eq!(completed, 3);
        assert_eq!(finished, 2);
    }
}
