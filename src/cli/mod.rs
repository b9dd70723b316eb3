//! Command-line interface components
//!
//! This module contains CLI-specific code for fanout_fetcher: argument
//! parsing, command handlers and the live progress display.

pub mod args;
pub mod commands;
pub mod progress;

pub use args::{Cli, Commands, ConfigAction, ConfigArgs, FetchArgs, GlobalArgs};
pub use commands::{handle_config, handle_fetch, OutputMode};
pub use progress::{format_outcome_line, ProgressConfig, ProgressDisplay, ProgressTally};
