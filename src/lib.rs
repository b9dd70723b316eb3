//! fanout_fetcher library
//!
//! A bounded-concurrency engine for fetching many independent resources over
//! HTTP. Every item ends as an outcome, failures included, and results are
//! reported in item order whatever order they completed in.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod prelude;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
