//! Integration tests for dispatch runs against a mock API
//!
//! A wiremock server stands in for the remote API. Each test runs a full
//! dispatch and checks the ordered report.

use std::net::TcpListener;
use std::time::Duration;

use fanout_fetcher::app::{dispatch, DispatchConfig, Dispatcher, OutcomeStatus, RunSummary};
use fanout_fetcher::errors::DispatchError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const TEMPLATE: &str = "/api/v2/pokemon/{id}";

fn config_for(server: &MockServer, items: u32, workers: usize) -> DispatchConfig {
    DispatchConfig::default()
        .with_base_url(server.uri())
        .with_path_template(TEMPLATE)
        .with_item_count(items)
        .with_worker_count(workers)
        .with_timeout(Duration::from_secs(2))
}

fn item_from_path(request: &Request) -> u32 {
    request
        .url
        .path()
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse().ok())
        .unwrap_or(0)
}

/// Answer every item with `{"name": "p<id>"}` after a short random delay
async fn mount_named_with_jitter(server: &MockServer) {
    Mock::given(method("GET"))
        .respond_with(|request: &Request| {
            let id = item_from_path(request);
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "id": id, "name": format!("p{}", id) }))
                .set_delay(Duration::from_millis(fastrand::u64(0..15)))
        })
        .mount(server)
        .await;
}

async fn mount_name(server: &MockServer, id: u32, name: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/api/v2/pokemon/{}", id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "name": name })))
        .expect(1)
        .mount(server)
        .await;
}

async fn run(config: DispatchConfig) -> RunSummary {
    dispatch(config).await.expect("dispatch should succeed")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_five_items_two_workers_report_in_order() {
    let server = MockServer::start().await;
    for (id, name) in (1..=5).zip(["a", "b", "c", "d", "e"]) {
        mount_name(&server, id, name).await;
    }

    let summary = run(config_for(&server, 5, 2)).await;

    assert_eq!(
        summary.report.success_lines(),
        vec!["#1 - a", "#2 - b", "#3 - c", "#4 - d", "#5 - e"]
    );
    assert_eq!(summary.report.failure_count(), 0);
    assert_eq!(summary.worker_count, 2);
}

#[tokio::test]
async fn test_gateway_timeout_is_reported_as_failure() {
    let server = MockServer::start().await;
    mount_name(&server, 1, "a").await;
    mount_name(&server, 3, "c").await;
    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon/2"))
        .respond_with(ResponseTemplate::new(504))
        .expect(1)
        .mount(&server)
        .await;

    let summary = run(config_for(&server, 3, 2)).await;

    assert_eq!(summary.report.success_lines(), vec!["#1 - a", "#3 - c"]);

    let failures = summary.report.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].item_id.get(), 2);
    assert_eq!(failures[0].status, OutcomeStatus::RemoteError(504));
    assert_eq!(failures[0].status.label(), "gateway-timeout");
}

#[tokio::test]
async fn test_zero_or_negative_workers_rejected_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = Dispatcher::new(config_for(&server, 5, 0));
    assert!(matches!(result, Err(DispatchError::Config(_))));

    assert!(DispatchConfig::worker_count_from_signed(-1).is_err());

    let received = server.received_requests().await.unwrap_or_default();
    assert!(received.is_empty());
}

#[tokio::test]
async fn test_single_worker_requests_in_ascending_order() {
    let server = MockServer::start().await;
    mount_named_with_jitter(&server).await;

    let summary = run(config_for(&server, 10, 1)).await;
    assert_eq!(summary.report.success_count(), 10);

    let requested: Vec<u32> = server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(item_from_path)
        .collect();
    assert_eq!(requested, (1..=10).collect::<Vec<u32>>());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_unbounded_matches_sequential_report() {
    let server = MockServer::start().await;
    mount_named_with_jitter(&server).await;

    let sequential = run(config_for(&server, 12, 1)).await;
    let unbounded = run(config_for(&server, 12, 1).unbounded()).await;

    assert_eq!(unbounded.worker_count, 12);
    assert_eq!(sequential.report, unbounded.report);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_every_item_has_exactly_one_outcome() {
    let server = MockServer::start().await;
    mount_named_with_jitter(&server).await;

    for (items, workers) in [(1, 1), (7, 3), (20, 4), (20, 20), (9, 16)] {
        let summary = run(config_for(&server, items, workers)).await;

        let ids: Vec<u32> = summary
            .report
            .successes()
            .iter()
            .map(|o| o.item_id.get())
            .collect();
        assert_eq!(ids, (1..=items).collect::<Vec<u32>>(), "N={} W={}", items, workers);
        assert_eq!(summary.worker_reports.len(), workers);
        assert!(summary.worker_reports.iter().all(|r| r.is_done()));

        let processed: u64 = summary
            .worker_reports
            .iter()
            .map(|r| r.items_processed)
            .sum();
        assert_eq!(processed, u64::from(items));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_slow_item_times_out_without_stalling_run() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon/2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "name": "slow" }))
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&server)
        .await;
    mount_named_with_jitter(&server).await;

    let config = config_for(&server, 4, 2).with_timeout(Duration::from_millis(300));
    let summary = run(config).await;

    assert!(summary.elapsed < Duration::from_secs(5));
    assert_eq!(summary.report.success_lines(), vec!["#1 - p1", "#3 - p3", "#4 - p4"]);

    let failures = summary.report.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].item_id.get(), 2);
    assert_eq!(failures[0].status, OutcomeStatus::Timeout);
}

#[tokio::test]
async fn test_unreachable_host_yields_transport_errors() {
    // Reserve a port, then close it so nothing is listening
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let config = DispatchConfig::default()
        .with_base_url(format!("http://127.0.0.1:{}", port))
        .with_item_count(3)
        .with_worker_count(2)
        .with_timeout(Duration::from_secs(2));
    let summary = run(config).await;

    assert_eq!(summary.report.total(), 3);
    assert_eq!(summary.report.success_count(), 0);
    assert!(summary
        .report
        .failures()
        .iter()
        .all(|o| o.status == OutcomeStatus::TransportError));
    assert_eq!(summary.report.failures_by_label().get("transport-error"), Some(&3));
}

#[tokio::test]
async fn test_empty_run_issues_no_requests() {
    let server = MockServer::start().await;

    let summary = run(config_for(&server, 0, 4)).await;

    assert_eq!(summary.report.total(), 0);
    assert_eq!(summary.idle_workers(), 4);
    let received = server.received_requests().await.unwrap_or_default();
    assert!(received.is_empty());
}
