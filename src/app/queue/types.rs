//! Queue statistics types

use serde::{Deserialize, Serialize};

/// Snapshot of queue counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStats {
    /// Items seeded into the queue
    pub total_added: u64,
    /// Items handed out to workers
    pub dispatched: u64,
    /// Items still waiting
    pub remaining: u64,
}

impl QueueStats {
    /// Percentage of seeded items already handed out
    pub fn dispatched_percentage(&self) -> f64 {
        if self.total_added == 0 {
            0.0
        } else {
            (self.dispatched as f64 / self.total_added as f64) * 100.0
        }
    }

    /// True once every seeded item has been handed out
    pub fn is_drained(&self) -> bool {
        self.remaining == 0
    }
}
