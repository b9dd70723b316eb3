//! Core fetch worker implementation
//!
//! A worker repeatedly takes the next item from the shared queue, runs the
//! fetch operation on it and appends the outcome to the shared sink. It stops
//! the first time the queue reports empty: the work set is fixed before any
//! worker starts, so there is nothing to wait for.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

use super::types::{WorkerProgress, WorkerReport};
use crate::app::client::FetchClient;
use crate::app::queue::WorkQueue;
use crate::app::sink::OutcomeSink;

/// Individual fetch worker
#[derive(Debug)]
pub struct FetchWorker {
    /// Worker identifier (1-based)
    id: u32,
    /// Shared work queue
    queue: Arc<WorkQueue>,
    /// Shared outcome sink
    sink: OutcomeSink,
    /// Shared fetch client
    client: Arc<FetchClient>,
    /// Deadline applied to every fetch
    deadline: Duration,
    /// Optional progress channel
    progress_tx: Option<mpsc::UnboundedSender<WorkerProgress>>,
    /// Running tally
    report: WorkerReport,
}

impl FetchWorker {
    /// Create a new worker
    pub fn new(
        id: u32,
        queue: Arc<WorkQueue>,
        sink: OutcomeSink,
        client: Arc<FetchClient>,
        deadline: Duration,
    ) -> Self {
        Self {
            id,
            queue,
            sink,
            client,
            deadline,
            progress_tx: None,
            report: WorkerReport::new(id),
        }
    }

    /// Attach a progress channel
    pub fn with_progress(mut self, progress_tx: mpsc::UnboundedSender<WorkerProgress>) -> Self {
        self.progress_tx = Some(progress_tx);
        self
    }

    /// Worker identifier
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Drain the queue until it is empty, then return this worker's tally
    pub async fn run(mut self) -> WorkerReport {
        debug!("Worker #{} starting", self.id);

        while let Some(item_id) = self.queue.next_item() {
            let outcome = self
                .client
                .fetch(item_id, self.deadline)
                .await
                .with_worker(self.id);

            debug!(
                "Worker #{} finished item #{}: {}",
                self.id, item_id, outcome.status
            );

            self.report.record(&outcome);
            self.send_progress(WorkerProgress::ItemCompleted {
                worker_id: self.id,
                outcome: outcome.clone(),
            });
            self.sink.push(outcome);
        }

        self.report.finish();
        self.send_progress(WorkerProgress::WorkerFinished {
            report: self.report,
        });
        debug!(
            "Worker #{} done after {} items",
            self.id, self.report.items_processed
        );

        self.report
    }

    fn send_progress(&self, event: WorkerProgress) {
        if let Some(tx) = &self.progress_tx {
            // Receiver gone means nobody is watching
            let _ = tx.send(event);
        }
    }
}
