//! Fetch workers
//!
//! Each worker is a loop over the shared [`WorkQueue`](crate::app::queue::WorkQueue):
//! take the next item, fetch it, append the outcome to the shared
//! [`OutcomeSink`](crate::app::sink::OutcomeSink). A failed fetch produces a
//! failure outcome and the worker moves on; there is no retry.
//!
//! # Module Organization
//!
//! - [`types`] - Lifecycle state, progress events and per-worker tallies
//! - [`core`] - The worker loop itself

pub mod core;
pub mod types;

pub use self::core::FetchWorker;
pub use types::{WorkerProgress, WorkerReport, WorkerState};
