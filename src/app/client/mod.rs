//! Fetch operation against the remote API
//!
//! [`FetchClient::fetch`] is the boundary where every failure becomes data:
//! whatever happens on the wire, the caller receives an [`Outcome`].
//!
//! The module is organized into:
//! - `config`: HTTP client configuration and building
//! - `http`: the deadline-bounded GET

use std::time::Duration;

use tracing::debug;

use crate::app::models::{ItemId, NamedResource, Outcome, ResourceTarget};
use crate::errors::{ClientResult, FetchResult};

pub mod config;
pub mod http;

pub use config::ClientConfig;

use http::HttpHandler;

/// Client that fetches one named resource per work item
#[derive(Debug, Clone)]
pub struct FetchClient {
    http_handler: HttpHandler,
    target: ResourceTarget,
}

impl FetchClient {
    /// Creates a client with default HTTP settings
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the HTTP client cannot be built
    pub fn new(target: ResourceTarget) -> ClientResult<Self> {
        Self::with_config(&ClientConfig::default(), target)
    }

    /// Creates a client with custom HTTP settings
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the HTTP client cannot be built
    pub fn with_config(config: &ClientConfig, target: ResourceTarget) -> ClientResult<Self> {
        let client = config.build_http_client()?;
        debug!(
            "Created fetch client for {}{}",
            target.base_url(),
            target.path_template()
        );

        Ok(Self {
            http_handler: HttpHandler::new(client),
            target,
        })
    }

    /// Fetch one item and classify the result
    ///
    /// Never fails: timeouts, remote status codes, connection problems and
    /// malformed bodies all come back as failure outcomes.
    pub async fn fetch(&self, item_id: ItemId, deadline: Duration) -> Outcome {
        let result = self.fetch_name(item_id, deadline).await;
        if let Err(e) = &result {
            debug!("Fetch of item #{} failed: {}", item_id, e);
        }
        Outcome::from_fetch(item_id, result)
    }

    /// Fetch one item and extract its `name` field
    pub async fn fetch_name(&self, item_id: ItemId, deadline: Duration) -> FetchResult<String> {
        let url = self.target.url_for(item_id)?;
        debug!("Fetching item #{} from {}", item_id, url);

        let body = self.http_handler.get_body(&url, deadline).await?;
        let resource: NamedResource = serde_json::from_slice(&body)?;
        Ok(resource.name)
    }

    /// Target this client fetches from
    pub fn target(&self) -> &ResourceTarget {
        &self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::OutcomeStatus;
    use std::net::TcpListener;
    use std::time::Instant;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn id(n: u32) -> ItemId {
        ItemId::new(n).unwrap()
    }

    fn client_for(base_url: &str) -> FetchClient {
        let target = ResourceTarget::new(base_url, "/api/v2/pokemon/{id}").unwrap();
        FetchClient::new(target).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_success_extracts_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/pokemon/1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"id": 1, "name": "bulbasaur"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let outcome = client_for(&server.uri())
            .fetch(id(1), Duration::from_secs(2))
            .await;

        assert_eq!(outcome.status, OutcomeStatus::Success);
        assert_eq!(outcome.name(), Some("bulbasaur"));
        assert_eq!(outcome.item_id, id(1));
        assert_eq!(outcome.worker_id, None);
    }

    #[tokio::test]
    async fn test_fetch_gateway_timeout_keeps_code() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(504))
            .mount(&server)
            .await;

        let outcome = client_for(&server.uri())
            .fetch(id(2), Duration::from_secs(2))
            .await;

        assert_eq!(outcome.status, OutcomeStatus::RemoteError(504));
        assert!(outcome.status.is_gateway_timeout());
    }

    #[tokio::test]
    async fn test_fetch_other_status_is_remote_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let outcome = client_for(&server.uri())
            .fetch(id(3), Duration::from_secs(2))
            .await;

        assert_eq!(outcome.status, OutcomeStatus::RemoteError(404));
        assert_eq!(outcome.status.label(), "remote-error");
    }

    #[tokio::test]
    async fn test_fetch_malformed_body_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
            .mount(&server)
            .await;

        let outcome = client_for(&server.uri())
            .fetch(id(4), Duration::from_secs(2))
            .await;

        assert_eq!(outcome.status, OutcomeStatus::TransportError);
    }

    #[tokio::test]
    async fn test_fetch_missing_name_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 5})))
            .mount(&server)
            .await;

        let outcome = client_for(&server.uri())
            .fetch(id(5), Duration::from_secs(2))
            .await;

        assert_eq!(outcome.status, OutcomeStatus::TransportError);
        assert!(outcome.payload.contains("name"));
    }

    #[tokio::test]
    async fn test_fetch_unresponsive_server_times_out_near_deadline() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"name": "late"}))
                    .set_delay(Duration::from_secs(10)),
            )
            .mount(&server)
            .await;

        let deadline = Duration::from_millis(200);
        let started = Instant::now();
        let outcome = client_for(&server.uri()).fetch(id(6), deadline).await;

        assert_eq!(outcome.status, OutcomeStatus::Timeout);
        assert!(started.elapsed() < deadline + Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_transport_error() {
        // Reserve a port, then close it so nothing is listening
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let outcome = client_for(&format!("http://127.0.0.1:{}", port))
            .fetch(id(7), Duration::from_secs(2))
            .await;

        assert_eq!(outcome.status, OutcomeStatus::TransportError);
    }
}
