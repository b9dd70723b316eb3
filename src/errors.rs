//! Error types for fanout_fetcher
//!
//! Item-level failures are never errors here: they are captured as
//! [`Outcome`](crate::app::Outcome) values at the fetch boundary. The types in
//! this module cover the conditions that stop a run before or around dispatch.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors, all detected before any worker starts
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Invalid configuration format
    #[error("Invalid configuration format")]
    InvalidFormat(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("Failed to serialize configuration")]
    Serialize(#[from] toml::ser::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// I/O error reading or writing configuration
    #[error("Configuration file I/O error: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Refused to overwrite an existing configuration file
    #[error("Configuration file already exists: {path}")]
    AlreadyExists { path: PathBuf },

    /// No user configuration directory on this platform
    #[error("Could not determine user config directory")]
    NoConfigDir,
}

impl ConfigError {
    /// Create an invalid-value error
    pub fn invalid(
        field: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// HTTP client construction errors
#[derive(Error, Debug)]
pub enum ClientError {
    /// reqwest refused the client configuration
    #[error("Failed to build HTTP client")]
    Build(#[from] reqwest::Error),
}

/// Failures of a single fetch, classified before becoming an outcome
#[derive(Error, Debug)]
pub enum FetchError {
    /// Deadline elapsed before the call completed
    #[error("Deadline of {deadline_ms} ms elapsed")]
    Timeout { deadline_ms: u128 },

    /// Remote answered with a non-success status
    #[error("Remote responded with HTTP {status}")]
    Remote { status: u16 },

    /// Connection-level failure
    #[error("Transport failure: {0}")]
    Transport(String),

    /// Body was not the expected JSON document
    #[error("Malformed response body: {0}")]
    Decode(String),

    /// Target URL could not be built for this item
    #[error("Invalid target URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        // The per-call deadline is enforced outside reqwest; its own timeouts
        // (connect) are connection failures
        if let Some(status) = error.status() {
            FetchError::Remote {
                status: status.as_u16(),
            }
        } else {
            FetchError::Transport(error.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(error: serde_json::Error) -> Self {
        FetchError::Decode(error.to_string())
    }
}

/// Dispatch lifecycle errors
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Configuration rejected before dispatch began
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Shared HTTP client could not be built
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Worker panicked or was cancelled
    #[error("Worker {worker_id} panicked or terminated unexpectedly")]
    WorkerPanic { worker_id: u32 },

    /// The sink did not end up with one outcome per item
    #[error("Expected {expected} outcomes but collected {actual}")]
    OutcomeCountMismatch { expected: usize, actual: usize },
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// HTTP client error
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Dispatch error
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("Application error: {message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Config(_) | AppError::Dispatch(DispatchError::Config(_)) => "config",
            AppError::Client(_) | AppError::Dispatch(DispatchError::Client(_)) => "client",
            AppError::Dispatch(_) => "dispatch",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Client result type alias
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Fetch result type alias
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Dispatch result type alias
pub type DispatchResult<T> = std::result::Result<T, DispatchError>;
