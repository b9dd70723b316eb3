//! Core work queue implementation
//!
//! The queue holds the fixed set of item identifiers for one run. Workers
//! take items from the head until the queue reports empty; nothing is ever
//! re-queued.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::app::models::ItemId;

use super::types::QueueStats;

#[derive(Debug, Default)]
struct QueueState {
    pending: VecDeque<ItemId>,
    total_added: u64,
    dispatched: u64,
}

/// Shared FIFO of pending work items
///
/// `next_item` removes and returns the head atomically, so concurrent workers
/// never receive the same item and no item is skipped. The lock is a plain
/// `std::sync::Mutex` and is never held across an `.await`.
#[derive(Debug, Default)]
pub struct WorkQueue {
    state: Mutex<QueueState>,
}

impl WorkQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a queue pre-loaded with `1..=item_count` in ascending order
    pub fn seeded(item_count: u32) -> Self {
        Self::from_items((1..=item_count).filter_map(ItemId::new))
    }

    /// Create a queue holding the given items in iteration order
    pub fn from_items(items: impl IntoIterator<Item = ItemId>) -> Self {
        let pending: VecDeque<ItemId> = items.into_iter().collect();
        let total_added = pending.len() as u64;
        debug!("Seeded work queue with {} items", total_added);

        Self {
            state: Mutex::new(QueueState {
                pending,
                total_added,
                dispatched: 0,
            }),
        }
    }

    /// Remove and return the head item, or `None` once the queue is empty
    pub fn next_item(&self) -> Option<ItemId> {
        let mut state = self.lock();
        let item = state.pending.pop_front()?;
        state.dispatched += 1;
        Some(item)
    }

    /// Number of items still waiting
    pub fn len(&self) -> usize {
        self.lock().pending.len()
    }

    /// Whether every item has been handed out
    pub fn is_empty(&self) -> bool {
        self.lock().pending.is_empty()
    }

    /// Current counters
    pub fn stats(&self) -> QueueStats {
        let state = self.lock();
        QueueStats {
            total_added: state.total_added,
            dispatched: state.dispatched,
            remaining: state.pending.len() as u64,
        }
    }

    // A panicking holder cannot leave the deque half-updated, so a poisoned
    // lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
