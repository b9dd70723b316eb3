//! Summary of a finished dispatch run

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::app::report::RunReport;
use crate::app::worker::WorkerReport;

/// Everything known about a run once every worker has finished
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Ordered, partitioned outcomes
    pub report: RunReport,
    /// Per-worker tallies, in worker id order
    pub worker_reports: Vec<WorkerReport>,
    /// Wall-clock time from first spawn to last join
    pub elapsed: Duration,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Workers started
    pub worker_count: usize,
    /// Items enqueued
    pub item_count: u32,
}

impl RunSummary {
    /// Completed items per second of wall-clock time
    pub fn items_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs <= 0.0 {
            return 0.0;
        }
        self.report.total() as f64 / secs
    }

    /// Workers that found the queue already empty
    pub fn idle_workers(&self) -> usize {
        self.worker_reports
            .iter()
            .filter(|r| r.items_processed == 0)
            .count()
    }

    /// Percentage of items that succeeded
    pub fn success_rate(&self) -> f64 {
        let total = self.report.total();
        if total == 0 {
            return 0.0;
        }
        (self.report.success_count() as f64 / total as f64) * 100.0
    }

    /// One-line timing summary printed after a run
    pub fn timing_line(&self) -> String {
        format!(
            "Elapsed time: {:.3} seconds for retrieval of {} names ({} workers, {} failures)",
            self.elapsed.as_secs_f64(),
            self.report.success_count(),
            self.worker_count,
            self.report.failure_count()
        )
    }
}
