//! The request-pipeline hook, exercised against a real axum server and a
//! UDP collector stand-in.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use uuid::Uuid;

use analytics_log::{
    analytics_middleware, AnalyticsLog, CollectorConfig, CollectorSink, LogSelector,
    SamplingConfig,
};

mod common;

async fn show(log: AnalyticsLog) -> &'static str {
    log.message("Controller action: demo#show");
    log.measure("view rendering", || "rendered")
}

async fn start_instrumented_server(
    server_addr: SocketAddr,
    collector_addr: SocketAddr,
    sampling: SamplingConfig,
) {
    common::init_tracing();
    let collector_config = CollectorConfig {
        address: collector_addr.to_string(),
        ..CollectorConfig::default()
    };
    let sink = Arc::new(CollectorSink::connect(&collector_config).await.unwrap());
    let selector = Arc::new(LogSelector::new(sink, sampling));

    let app = Router::new()
        .route("/show", get(show))
        .layer(middleware::from_fn_with_state(
            selector,
            analytics_middleware,
        ));

    let listener = TcpListener::bind(server_addr).await.unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    tokio::time::sleep(Duration::from_millis(100)).await;
}

#[tokio::test]
async fn test_request_emits_ordered_batch() {
    let collector_addr: SocketAddr = "127.0.0.1:29511".parse().unwrap();
    let server_addr: SocketAddr = "127.0.0.1:29512".parse().unwrap();

    let mut collector = common::start_udp_collector(collector_addr).await;
    start_instrumented_server(server_addr, collector_addr, SamplingConfig::default()).await;

    let request_id = Uuid::new_v4();
    let client = reqwest::Client::new();
    let response = client
        .get(format!("http://{server_addr}/show"))
        .header("x-request-id", request_id.to_string())
        .send()
        .await
        .expect("server unreachable");
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "rendered");

    let batch = common::recv_batch(&mut collector, Duration::from_secs(2)).await;
    assert_eq!(batch["request_id"], request_id.to_string());
    assert!(batch["started_at"].as_u64().unwrap() > 0);

    let records = batch["records"].as_array().unwrap();
    let find_span = |name: &str| {
        records
            .iter()
            .find(|r| r["kind"] == "span" && r["name"] == name)
            .unwrap_or_else(|| panic!("span {name:?} missing from batch"))
    };

    let outer = find_span("request processing");
    let inner = find_span("view rendering");
    assert_eq!(outer["depth"], 0);
    assert_eq!(outer["sequence"], 0);
    assert_eq!(inner["depth"], 1);
    assert_eq!(inner["sequence"], 0);
    assert!(outer["start"].as_u64().unwrap() <= inner["start"].as_u64().unwrap());
    assert!(outer["end"].as_u64().unwrap() >= inner["end"].as_u64().unwrap());

    let message = records
        .iter()
        .find(|r| r["kind"] == "message")
        .expect("message missing from batch");
    assert_eq!(message["text"], "Controller action: demo#show");
}

#[tokio::test]
async fn test_unsampled_request_is_untouched() {
    let collector_addr: SocketAddr = "127.0.0.1:29521".parse().unwrap();
    let server_addr: SocketAddr = "127.0.0.1:29522".parse().unwrap();

    let mut collector = common::start_udp_collector(collector_addr).await;
    start_instrumented_server(
        server_addr,
        collector_addr,
        SamplingConfig {
            enabled: true,
            sample_rate: 0.0,
        },
    )
    .await;

    let response = reqwest::get(format!("http://{server_addr}/show"))
        .await
        .expect("server unreachable");
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "rendered");

    // No batch should arrive for an unsampled request.
    let nothing = tokio::time::timeout(Duration::from_millis(300), collector.recv()).await;
    assert!(nothing.is_err(), "unsampled request must not emit a batch");
}

#[tokio::test]
async fn test_handler_works_without_middleware() {
    // Extractor falls back to the disabled log when the hook is absent.
    let server_addr: SocketAddr = "127.0.0.1:29532".parse().unwrap();

    let app = Router::new().route("/show", get(show));
    let listener = TcpListener::bind(server_addr).await.unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let response = reqwest::get(format!("http://{server_addr}/show"))
        .await
        .expect("server unreachable");
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "rendered");
}
