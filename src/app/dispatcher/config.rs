//! Configuration for a single dispatch run
//!
//! A [`DispatchConfig`] is immutable once a run starts. Sequential and
//! unbounded fan-out are presets over the same structure, not separate modes.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::app::models::ResourceTarget;
use crate::constants::{http, target, workers};
use crate::errors::{ConfigError, ConfigResult};

/// Parameters of one dispatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Scheme and host of the remote API
    pub base_url: String,
    /// Resource path with an `{id}` placeholder
    pub path_template: String,
    /// Items `1..=item_count` are fetched
    pub item_count: u32,
    /// Deadline for each individual fetch
    #[serde(with = "humantime_serde")]
    pub per_call_timeout: Duration,
    /// Number of concurrent workers
    pub worker_count: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            base_url: target::DEFAULT_BASE_URL.to_string(),
            path_template: target::DEFAULT_PATH_TEMPLATE.to_string(),
            item_count: target::DEFAULT_ITEM_COUNT,
            per_call_timeout: http::DEFAULT_CALL_TIMEOUT,
            worker_count: workers::DEFAULT_WORKER_COUNT,
        }
    }
}

impl DispatchConfig {
    /// Set the remote base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the resource path template
    pub fn with_path_template(mut self, path_template: impl Into<String>) -> Self {
        self.path_template = path_template.into();
        self
    }

    /// Set the number of items to fetch
    pub fn with_item_count(mut self, item_count: u32) -> Self {
        self.item_count = item_count;
        self
    }

    /// Set the per-call deadline
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.per_call_timeout = timeout;
        self
    }

    /// Set the worker count
    pub fn with_worker_count(mut self, count: usize) -> Self {
        self.worker_count = count;
        self
    }

    /// One worker: items are fetched strictly in ascending order
    pub fn sequential(self) -> Self {
        self.with_worker_count(1)
    }

    /// One worker per item, up to the supported worker limit
    pub fn unbounded(self) -> Self {
        let count = (self.item_count as usize).clamp(1, workers::MAX_WORKER_COUNT);
        self.with_worker_count(count)
    }

    /// Convert a signed worker count from user input
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for zero or negative counts.
    pub fn worker_count_from_signed(value: i64) -> ConfigResult<usize> {
        if value <= 0 {
            return Err(ConfigError::invalid(
                "worker_count",
                value,
                "At least one worker is required",
            ));
        }
        usize::try_from(value)
            .map_err(|_| ConfigError::invalid("worker_count", value, "Value is too large"))
    }

    /// Convert fractional seconds from user input into a deadline
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for zero, negative or non-finite values.
    pub fn timeout_from_secs(value: f64) -> ConfigResult<Duration> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ConfigError::invalid(
                "per_call_timeout",
                value,
                "Timeout must be a positive number of seconds",
            ));
        }
        Duration::try_from_secs_f64(value)
            .map_err(|e| ConfigError::invalid("per_call_timeout", value, e.to_string()))
    }

    /// Build the remote target described by this configuration
    pub fn target(&self) -> ConfigResult<ResourceTarget> {
        ResourceTarget::new(&self.base_url, &self.path_template)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.worker_count == 0 {
            return Err(ConfigError::invalid(
                "worker_count",
                self.worker_count,
                "At least one worker is required",
            ));
        }

        if self.worker_count > workers::MAX_WORKER_COUNT {
            return Err(ConfigError::invalid(
                "worker_count",
                self.worker_count,
                format!("At most {} workers are supported", workers::MAX_WORKER_COUNT),
            ));
        }

        if self.item_count > target::MAX_ITEM_COUNT {
            return Err(ConfigError::invalid(
                "item_count",
                self.item_count,
                format!("At most {} items are supported", target::MAX_ITEM_COUNT),
            ));
        }

        if self.per_call_timeout.is_zero() {
            return Err(ConfigError::invalid(
                "per_call_timeout",
                format!("{:?}", self.per_call_timeout),
                "Timeout cannot be zero",
            ));
        }

        self.target()?;
        Ok(())
    }
}
