//! Prelude module for the fanout_fetcher library
//!
//! Re-exports the items most integrations need, so a single
//! `use fanout_fetcher::prelude::*;` is enough for typical usage.
//!
//! # Usage
//!
//! ```rust,no_run
//! use fanout_fetcher::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = DispatchConfig::default().with_worker_count(DEFAULT_WORKER_COUNT);
//!     let summary = Dispatcher::new(config)?.run().await?;
//!     println!("{}", summary.report.render(false));
//!     Ok(())
//! }
//! ```

// Core result types
pub use crate::errors::{AppError, Result};

// Engine components
pub use crate::app::{
    dispatch, ClientConfig, DispatchConfig, Dispatcher, FetchClient, ItemId, Outcome,
    OutcomeSink, OutcomeStatus, RunReport, RunSummary, WorkQueue, WorkerProgress, WorkerReport,
};

// Configuration loading
pub use crate::config::AppConfig;

// Commonly used constants
pub use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_CALL_TIMEOUT, DEFAULT_ITEM_COUNT, DEFAULT_PATH_TEMPLATE,
    DEFAULT_WORKER_COUNT,
};

pub use std::sync::Arc;

pub use tokio;
