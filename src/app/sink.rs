//! Shared collection of outcomes produced by workers

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::app::models::Outcome;

/// Append-only outcome collection shared by every worker in a run
///
/// Cloning is cheap and yields another handle to the same collection.
/// Arrival order reflects completion order, which is nondeterministic.
#[derive(Debug, Clone, Default)]
pub struct OutcomeSink {
    outcomes: Arc<Mutex<Vec<Outcome>>>,
}

impl OutcomeSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty sink sized for the expected number of outcomes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(Vec::with_capacity(capacity))),
        }
    }

    /// Append one outcome
    pub fn push(&self, outcome: Outcome) {
        self.lock().push(outcome);
    }

    /// Number of outcomes collected so far
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been collected yet
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Take every collected outcome, in arrival order, leaving the sink empty
    pub fn drain(&self) -> Vec<Outcome> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Outcome>> {
        self.outcomes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
