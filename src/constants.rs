//! Application constants for fanout_fetcher
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain for maintainability and clarity.

use std::time::Duration;

/// Environment variable names for configuration overrides
pub mod env {
    /// Base URL of the remote API
    pub const BASE_URL: &str = "FANOUT_BASE_URL";

    /// Path template with an `{id}` placeholder
    pub const PATH_TEMPLATE: &str = "FANOUT_PATH_TEMPLATE";

    /// Number of items to fetch
    pub const ITEMS: &str = "FANOUT_ITEMS";

    /// Per-call deadline in (fractional) seconds
    pub const TIMEOUT_SECS: &str = "FANOUT_TIMEOUT_SECS";

    /// Number of concurrent workers
    pub const WORKERS: &str = "FANOUT_WORKERS";
}

/// Remote resource defaults
pub mod target {
    /// Default API host
    pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co";

    /// Default resource path; `{id}` is replaced by the item identifier
    pub const DEFAULT_PATH_TEMPLATE: &str = "/api/v2/pokemon/{id}";

    /// Placeholder substituted with the item identifier
    pub const ID_PLACEHOLDER: &str = "{id}";

    /// Default number of items to fetch
    pub const DEFAULT_ITEM_COUNT: u32 = 150;

    /// Upper bound on items in one run; queue and sink are allocated up front
    pub const MAX_ITEM_COUNT: u32 = 1_000_000;
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = concat!("fanout-fetcher/", env!("CARGO_PKG_VERSION"));

    /// Default per-call deadline
    pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(1);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// TCP keep-alive interval
    pub const TCP_KEEPALIVE: Duration = Duration::from_secs(30);

    /// Connection pool idle timeout
    pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

    /// HTTP status the remote uses for an upstream gateway timeout
    pub const GATEWAY_TIMEOUT: u16 = 504;
}

/// Worker and concurrency configuration
pub mod workers {
    /// Default number of fetch workers
    pub const DEFAULT_WORKER_COUNT: usize = 8;

    /// Upper bound on workers accepted from configuration
    pub const MAX_WORKER_COUNT: usize = 4096;
}

/// Configuration file locations
pub mod config {
    /// Project-local configuration file name
    pub const LOCAL_FILE_NAME: &str = "fanout-fetcher.toml";

    /// Directory under the user config dir
    pub const APP_DIR_NAME: &str = "fanout-fetcher";

    /// File name inside the user config directory
    pub const USER_FILE_NAME: &str = "config.toml";
}

/// Logging constants
pub mod logging {
    /// Default log level
    pub const DEFAULT_LOG_LEVEL: &str = "warn";
}

// Re-export commonly used constants for convenience
pub use http::{DEFAULT_CALL_TIMEOUT, GATEWAY_TIMEOUT, USER_AGENT};
pub use target::{DEFAULT_BASE_URL, DEFAULT_ITEM_COUNT, DEFAULT_PATH_TEMPLATE};
pub use workers::DEFAULT_WORKER_COUNT;
