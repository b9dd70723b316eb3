//! Data models for fanout_fetcher
//!
//! This module defines the core data structures used throughout the application:
//! work item identifiers, the remote resource target, and the classified
//! outcome of each fetch.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::{http, target};
use crate::errors::{ConfigError, ConfigResult, FetchError, FetchResult};

/// Identifier of one work item (always positive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u32);

impl ItemId {
    /// Create an identifier, rejecting zero
    pub fn new(id: u32) -> Option<Self> {
        (id > 0).then_some(Self(id))
    }

    /// Raw identifier value
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Classification of a single fetch attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeStatus {
    /// Remote answered 2xx and the body carried a name
    Success,
    /// The per-call deadline elapsed
    Timeout,
    /// Remote answered with a non-success status code
    RemoteError(u16),
    /// Connection failure, malformed body or missing field
    TransportError,
}

impl OutcomeStatus {
    /// Map a non-success HTTP status code to its outcome kind
    pub fn from_status_code(code: u16) -> Self {
        OutcomeStatus::RemoteError(code)
    }

    /// Whether this status represents a successful fetch
    pub fn is_success(&self) -> bool {
        matches!(self, OutcomeStatus::Success)
    }

    /// Whether the remote reported an upstream gateway timeout
    pub fn is_gateway_timeout(&self) -> bool {
        matches!(self, OutcomeStatus::RemoteError(code) if *code == http::GATEWAY_TIMEOUT)
    }

    /// Short machine-friendly label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            OutcomeStatus::Success => "success",
            OutcomeStatus::Timeout => "timeout",
            OutcomeStatus::RemoteError(_) if self.is_gateway_timeout() => "gateway-timeout",
            OutcomeStatus::RemoteError(_) => "remote-error",
            OutcomeStatus::TransportError => "transport-error",
        }
    }
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeStatus::RemoteError(code) => write!(f, "{} (HTTP {})", self.label(), code),
            _ => write!(f, "{}", self.label()),
        }
    }
}

/// Classified result of fetching one work item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Item this outcome belongs to
    pub item_id: ItemId,
    /// How the fetch ended
    pub status: OutcomeStatus,
    /// Resource name on success, error detail otherwise
    pub payload: String,
    /// Worker that produced the outcome, when produced inside a pool
    pub worker_id: Option<u32>,
}

impl Outcome {
    /// Successful outcome carrying the resource name
    pub fn success(item_id: ItemId, name: impl Into<String>) -> Self {
        Self {
            item_id,
            status: OutcomeStatus::Success,
            payload: name.into(),
            worker_id: None,
        }
    }

    /// Failed outcome with a diagnostic detail
    pub fn failure(item_id: ItemId, status: OutcomeStatus, detail: impl Into<String>) -> Self {
        Self {
            item_id,
            status,
            payload: detail.into(),
            worker_id: None,
        }
    }

    /// Build the outcome for a finished fetch
    ///
    /// Every [`FetchError`] variant maps to exactly one failure kind, so the
    /// conversion is total.
    pub fn from_fetch(item_id: ItemId, result: FetchResult<String>) -> Self {
        match result {
            Ok(name) => Self::success(item_id, name),
            Err(error) => {
                let status = match &error {
                    FetchError::Timeout { .. } => OutcomeStatus::Timeout,
                    FetchError::Remote { status } => OutcomeStatus::from_status_code(*status),
                    FetchError::Transport(_)
                    | FetchError::Decode(_)
                    | FetchError::InvalidUrl { .. } => OutcomeStatus::TransportError,
                };
                Self::failure(item_id, status, error.to_string())
            }
        }
    }

    /// Tag the outcome with the worker that produced it
    pub fn with_worker(mut self, worker_id: u32) -> Self {
        self.worker_id = Some(worker_id);
        self
    }

    /// Whether the fetch succeeded
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Resource name, present only on success
    pub fn name(&self) -> Option<&str> {
        self.is_success().then_some(self.payload.as_str())
    }
}

/// JSON body shape expected from the remote
#[derive(Debug, Clone, Deserialize)]
pub struct NamedResource {
    /// Resource name
    pub name: String,
}

/// Base URL plus path template naming every remote resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceTarget {
    base_url: Url,
    path_template: String,
}

impl ResourceTarget {
    /// Create a target from a base URL and a path template containing `{id}`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the base URL does not parse or is
    /// not http(s), and if the template is not an absolute path containing the
    /// `{id}` placeholder.
    pub fn new(base_url: &str, path_template: &str) -> ConfigResult<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| ConfigError::invalid("base_url", base_url, e.to_string()))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::invalid(
                "base_url",
                base_url,
                "Only http and https URLs are supported",
            ));
        }

        if !path_template.contains(target::ID_PLACEHOLDER) {
            return Err(ConfigError::invalid(
                "path_template",
                path_template,
                format!("Template must contain the {} placeholder", target::ID_PLACEHOLDER),
            ));
        }

        if !path_template.starts_with('/') {
            return Err(ConfigError::invalid(
                "path_template",
                path_template,
                "Template must start with '/'",
            ));
        }

        let target = Self {
            base_url: parsed,
            path_template: path_template.to_string(),
        };

        // The first identifier must produce a usable URL
        if let Some(first) = ItemId::new(1) {
            target
                .url_for(first)
                .map_err(|e| ConfigError::invalid("path_template", path_template, e.to_string()))?;
        }

        Ok(target)
    }

    /// Build the URL of one resource
    pub fn url_for(&self, item_id: ItemId) -> FetchResult<Url> {
        let path = self
            .path_template
            .replace(target::ID_PLACEHOLDER, &item_id.to_string());
        let raw = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path);

        Url::parse(&raw).map_err(|e| FetchError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })
    }

    /// Configured base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Configured path template
    pub fn path_template(&self) -> &str {
        &self.path_template
    }
}
