//! Core HTTP operation with a per-call deadline

use std::time::Duration;

use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::errors::{FetchError, FetchResult};

/// Performs single GET requests bounded by a deadline
#[derive(Debug, Clone)]
pub struct HttpHandler {
    client: Client,
}

impl HttpHandler {
    /// Creates a new HttpHandler around a configured client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Issue one GET and return the body of a 2xx response
    ///
    /// The deadline covers the whole call: connecting, receiving headers and
    /// reading the body. No retry is attempted.
    ///
    /// # Errors
    ///
    /// - `FetchError::Timeout` if the deadline elapses first
    /// - `FetchError::Remote` for any non-2xx status, including redirects
    /// - `FetchError::Transport` for connection-level failures, including the
    ///   client's connect timeout
    pub async fn get_body(&self, url: &Url, deadline: Duration) -> FetchResult<Vec<u8>> {
        let deadline_ms = deadline.as_millis();

        let call = async {
            let response = self.client.get(url.as_str()).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Remote {
                    status: status.as_u16(),
                });
            }
            let body = response.bytes().await?;
            Ok::<_, FetchError>(body.to_vec())
        };

        match tokio::time::timeout(deadline, call).await {
            Ok(Ok(body)) => {
                debug!("Fetched {} bytes from {}", body.len(), url);
                Ok(body)
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err(FetchError::Timeout { deadline_ms }),
        }
    }

    /// Get a reference to the underlying HTTP client
    pub fn client(&self) -> &Client {
        &self.client
    }
}
