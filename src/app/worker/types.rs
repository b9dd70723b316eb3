//! Worker type definitions
//!
//! Lifecycle state, progress events and the per-worker tally returned when a
//! worker finishes.

use serde::{Deserialize, Serialize};

use crate::app::models::Outcome;

/// Lifecycle of a worker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerState {
    /// Draining the queue
    #[default]
    Running,
    /// Queue reported empty; terminal
    Done,
}

/// Event emitted by a worker while it runs
///
/// Events are sent without blocking; a closed receiver is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerProgress {
    /// One item finished, successfully or not
    ItemCompleted {
        /// Worker that handled the item
        worker_id: u32,
        /// Outcome appended to the sink
        outcome: Outcome,
    },
    /// The worker reached `Done`
    WorkerFinished {
        /// Final tally for this worker
        report: WorkerReport,
    },
}

/// Tally of what one worker processed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerReport {
    /// Worker identifier (1-based)
    pub worker_id: u32,
    /// Lifecycle state when the report was taken
    pub state: WorkerState,
    /// Items taken from the queue
    pub items_processed: u64,
    /// Items that ended in success
    pub successes: u64,
    /// Items that ended in any failure kind
    pub failures: u64,
}

impl WorkerReport {
    /// Empty tally for a worker
    pub fn new(worker_id: u32) -> Self {
        Self {
            worker_id,
            ..Default::default()
        }
    }

    /// Mark the worker as finished
    pub fn finish(&mut self) {
        self.state = WorkerState::Done;
    }

    /// Whether the worker reached `Done`
    pub fn is_done(&self) -> bool {
        self.state == WorkerState::Done
    }

    /// Count one outcome
    pub fn record(&mut self, outcome: &Outcome) {
        self.items_processed += 1;
        if outcome.is_success() {
            self.successes += 1;
        } else {
            self.failures += 1;
        }
    }
}
