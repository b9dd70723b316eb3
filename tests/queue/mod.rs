//! Integration tests for the work queue and outcome sink
//!
//! These tests drive the queue and sink the way workers do, from many tasks
//! at once, and check that every item is handed out and recorded exactly once.

use fanout_fetcher::app::models::{ItemId, Outcome};
use fanout_fetcher::app::queue::WorkQueue;
use fanout_fetcher::app::sink::OutcomeSink;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_simulated_workers_drain_queue_exactly_once() {
    let item_count = 200u32;
    let queue = Arc::new(WorkQueue::seeded(item_count));
    let sink = OutcomeSink::with_capacity(item_count as usize);

    // Spawn multiple workers
    let worker_count = 8u32;
    let mut handles = Vec::new();

    for worker_id in 1..=worker_count {
        let queue = Arc::clone(&queue);
        let sink = sink.clone();
        handles.push(tokio::spawn(async move {
            let mut processed = 0u32;
            while let Some(item) = queue.next_item() {
                // Simulate request latency with some jitter
                sleep(Duration::from_millis(fastrand::u64(0..3))).await;
                sink.push(Outcome::success(item, format!("name-{}", item)).with_worker(worker_id));
                processed += 1;
            }
            processed
        }));
    }

    // Wait for all workers to complete
    let mut total_processed = 0;
    for handle in handles {
        total_processed += handle.await.unwrap();
    }

    assert_eq!(total_processed, item_count);

    let outcomes = sink.drain();
    assert_eq!(outcomes.len(), item_count as usize);

    let ids: HashSet<u32> = outcomes.iter().map(|o| o.item_id.get()).collect();
    let expected: HashSet<u32> = (1..=item_count).collect();
    assert_eq!(ids, expected);

    let stats = queue.stats();
    assert!(stats.is_drained());
    assert_eq!(stats.dispatched, u64::from(item_count));
    assert_eq!(stats.dispatched_percentage(), 100.0);
}

#[tokio::test]
async fn test_single_consumer_sees_ascending_order() {
    let queue = WorkQueue::seeded(50);
    let mut previous = 0;

    while let Some(item) = queue.next_item() {
        assert!(item.get() > previous);
        previous = item.get();
    }

    assert_eq!(previous, 50);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_more_consumers_than_items() {
    let queue = Arc::new(WorkQueue::seeded(3));

    let mut handles = Vec::new();
    for _ in 0..10 {
        let queue = Arc::clone(&queue);
        handles.push(tokio::spawn(async move { queue.next_item() }));
    }

    let mut taken = Vec::new();
    for handle in handles {
        if let Some(item) = handle.await.unwrap() {
            taken.push(item);
        }
    }

    taken.sort();
    assert_eq!(taken, vec![ItemId::new(1).unwrap(), ItemId::new(2).unwrap(), ItemId::new(3).unwrap()]);
    assert!(queue.is_empty());
}

#[test]
fn test_queue_stats_progress() {
    let queue = WorkQueue::seeded(4);
    assert_eq!(queue.stats().dispatched_percentage(), 0.0);

    queue.next_item();
    assert_eq!(queue.stats().dispatched_percentage(), 25.0);

    while queue.next_item().is_some() {}
    assert!(queue.stats().is_drained());
}
