//! Work queue for a fixed set of fetch items
//!
//! The queue is seeded once, before any worker starts, with the identifiers
//! `1..=item_count`. Workers then race to remove items from the head. The
//! only guarantee about distribution is that the set of items handed out
//! equals the seeded set: each identifier is returned exactly once.
//!
//! # Basic Usage
//!
//! ```rust
//! use fanout_fetcher::app::queue::WorkQueue;
//!
//! let queue = WorkQueue::seeded(3);
//! while let Some(item) = queue.next_item() {
//!     println!("fetching #{}", item);
//! }
//! assert!(queue.is_empty());
//! ```

pub mod core;
pub mod types;

pub use self::core::WorkQueue;
pub use types::QueueStats;
