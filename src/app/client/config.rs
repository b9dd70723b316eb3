//! HTTP client configuration and building logic

use std::time::Duration;

use reqwest::{redirect, Client};
use serde::{Deserialize, Serialize};

use crate::constants::{http, workers};
use crate::errors::{ClientError, ClientResult};

/// Configuration for the shared HTTP client
///
/// The per-call deadline is not part of this configuration: it belongs to the
/// dispatch and is enforced around each call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// User agent sent with every request
    pub user_agent: String,
    /// Connect timeout
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
    /// TCP nodelay (disable Nagle's algorithm)
    pub tcp_nodelay: bool,
    /// TCP keep-alive interval
    #[serde(with = "humantime_serde")]
    pub tcp_keepalive: Option<Duration>,
    /// Connection pool idle timeout
    #[serde(with = "humantime_serde")]
    pub pool_idle_timeout: Option<Duration>,
    /// Maximum idle connections kept per host; the worker count when unset
    pub pool_max_idle_per_host: Option<usize>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: http::USER_AGENT.to_string(),
            connect_timeout: http::CONNECT_TIMEOUT,
            tcp_nodelay: true,
            tcp_keepalive: Some(http::TCP_KEEPALIVE),
            pool_idle_timeout: Some(http::POOL_IDLE_TIMEOUT),
            pool_max_idle_per_host: None,
        }
    }
}

impl ClientConfig {
    /// Set the idle connection pool size
    pub fn with_pool_size(mut self, size: usize) -> Self {
        self.pool_max_idle_per_host = Some(size.max(1));
        self
    }

    /// Size the idle pool from the worker count unless explicitly configured
    pub fn sized_for(self, worker_count: usize) -> Self {
        match self.pool_max_idle_per_host {
            Some(_) => self,
            None => self.with_pool_size(worker_count),
        }
    }

    /// Idle pool size the client will be built with
    pub fn effective_pool_size(&self) -> usize {
        self.pool_max_idle_per_host
            .unwrap_or(workers::DEFAULT_WORKER_COUNT)
    }

    /// Builds the HTTP client with the specified configuration
    ///
    /// Redirects are never followed: a 3xx answer is reported as a remote
    /// status like any other non-success code.
    pub fn build_http_client(&self) -> ClientResult<Client> {
        let mut client_builder = Client::builder()
            .redirect(redirect::Policy::none())
            .user_agent(self.user_agent.as_str())
            .connect_timeout(self.connect_timeout)
            .tcp_nodelay(self.tcp_nodelay)
            .pool_max_idle_per_host(self.effective_pool_size());

        if let Some(keepalive) = self.tcp_keepalive {
            client_builder = client_builder.tcp_keepalive(keepalive);
        }

        if let Some(idle_timeout) = self.pool_idle_timeout {
            client_builder = client_builder.pool_idle_timeout(idle_timeout);
        }

        client_builder.build().map_err(ClientError::Build)
    }
}
