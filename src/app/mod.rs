//! Core application logic for fanout_fetcher
//!
//! This module contains the fetch engine: the fetch operation, the shared work
//! queue and outcome sink, the workers draining them, the dispatcher owning
//! the worker pool, and the aggregator that orders the results.
//!
//! # Examples
//!
//! ```rust,no_run
//! use fanout_fetcher::app::{dispatch, DispatchConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Sequential baseline and full fan-out run through the same engine
//! let sequential = dispatch(DispatchConfig::default().sequential()).await?;
//! let unbounded = dispatch(DispatchConfig::default().unbounded()).await?;
//!
//! assert_eq!(sequential.report.total(), unbounded.report.total());
//! println!("{}", unbounded.timing_line());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod dispatcher;
pub mod models;
pub mod queue;
pub mod report;
pub mod sink;
pub mod worker;

// Re-export main public API
pub use client::{ClientConfig, FetchClient};
pub use dispatcher::{dispatch, DispatchConfig, Dispatcher, RunSummary};
pub use models::{ItemId, NamedResource, Outcome, OutcomeStatus, ResourceTarget};
pub use queue::{QueueStats, WorkQueue};
pub use report::RunReport;
pub use sink::OutcomeSink;
pub use worker::{FetchWorker, WorkerProgress, WorkerReport, WorkerState};
