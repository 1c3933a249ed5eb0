//! End-to-end HTTP tests: real sockets, filesystem store, stubbed scorer.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{Json, Router, extract::State, routing::post};
use tempfile::TempDir;
use tokio::net::TcpListener;

use screengate::broker::InvocationBroker;
use screengate::formatter::{AT_RISK_STATEMENT, HEALTHY_STATEMENT};
use screengate::gateway::{HandlerState, create_router_with_state};
use screengate::scorer::LambdaScorer;
use screengate::store::FsRecordStore;

const STUB_FUNCTION_NAME: &str = "depression-detector";

/// Counts invocations and always answers with the configured output code.
#[derive(Clone)]
struct ScorerStub {
    output: &'static str,
    invocations: Arc<AtomicUsize>,
}

async fn stub_invoke_handler(
    State(stub): State<ScorerStub>,
    Json(payload): Json<serde_json::Value>,
) -> Json<serde_json::Value> {
    assert!(
        payload.get("input").is_some_and(|v| v.is_string()),
        "invocation payload should carry a string input"
    );

    stub.invocations.fetch_add(1, Ordering::SeqCst);
    Json(serde_json::json!({ "output": stub.output }))
}

/// Serves the Lambda invocation wire shape on an ephemeral port.
async fn spawn_scorer_stub(output: &'static str) -> (SocketAddr, Arc<AtomicUsize>) {
    let invocations = Arc::new(AtomicUsize::new(0));
    let stub = ScorerStub {
        output,
        invocations: Arc::clone(&invocations),
    };

    let app = Router::new()
        .route(
            "/2015-03-31/functions/{name}/invocations",
            post(stub_invoke_handler),
        )
        .with_state(stub);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("stub should bind");
    let addr = listener.local_addr().expect("stub should have an address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub should serve");
    });

    (addr, invocations)
}

async fn spawn_gateway(data_path: std::path::PathBuf, scorer_addr: SocketAddr) -> SocketAddr {
    let store = FsRecordStore::new(data_path);
    store.ensure_data_path().expect("data path should be usable");

    let scorer = LambdaScorer::with_endpoint(
        reqwest::Client::new(),
        STUB_FUNCTION_NAME,
        &format!("http://{}", scorer_addr),
    );

    let state = HandlerState::new(Arc::new(InvocationBroker::new(store, scorer)));
    let app = create_router_with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("gateway should bind");
    let addr = listener
        .local_addr()
        .expect("gateway should have an address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("gateway should serve");
    });

    addr
}

async fn post_screening(addr: SocketAddr, input: &str) -> (reqwest::StatusCode, serde_json::Value) {
    let response = reqwest::Client::new()
        .post(format!("http://{}/api/v1/screenings", addr))
        .json(&serde_json::json!({ "input": input }))
        .send()
        .await
        .expect("request should reach the gateway");

    let status = response.status();
    let body = response.json().await.expect("body should be JSON");
    (status, body)
}

#[tokio::test]
async fn test_screening_round_trip_over_real_sockets() {
    let data_dir = TempDir::new().expect("temp dir should be created");
    let (scorer_addr, invocations) = spawn_scorer_stub("1").await;
    let gateway_addr = spawn_gateway(data_dir.path().to_path_buf(), scorer_addr).await;

    let (status, body) = post_screening(gateway_addr, "I feel sad all the time").await;

    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(body["statement"], AT_RISK_STATEMENT);
    assert_eq!(invocations.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_repeat_screening_is_answered_from_disk() {
    let data_dir = TempDir::new().expect("temp dir should be created");
    let (scorer_addr, invocations) = spawn_scorer_stub("0").await;
    let gateway_addr = spawn_gateway(data_dir.path().to_path_buf(), scorer_addr).await;

    let (_, first) = post_screening(gateway_addr, "doing fine lately").await;
    let (_, second) = post_screening(gateway_addr, "doing fine lately").await;

    assert_eq!(first["statement"], HEALTHY_STATEMENT);
    assert_eq!(second, first);
    assert_eq!(invocations.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_records_survive_gateway_restart() {
    let data_dir = TempDir::new().expect("temp dir should be created");
    let (scorer_addr, invocations) = spawn_scorer_stub("1").await;

    let first_gateway = spawn_gateway(data_dir.path().to_path_buf(), scorer_addr).await;
    post_screening(first_gateway, "I feel sad all the time").await;
    assert_eq!(invocations.load(Ordering::SeqCst), 1);

    // A second gateway over the same data directory must reuse the record.
    let second_gateway = spawn_gateway(data_dir.path().to_path_buf(), scorer_addr).await;
    let (status, body) = post_screening(second_gateway, "I feel sad all the time").await;

    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(body["statement"], AT_RISK_STATEMENT);
    assert_eq!(invocations.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unreachable_scorer_maps_to_bad_gateway() {
    let data_dir = TempDir::new().expect("temp dir should be created");
    // Port 9 (discard) refuses connections; the stub is never spawned.
    let dead_addr: SocketAddr = "127.0.0.1:9".parse().expect("addr should parse");
    let gateway_addr = spawn_gateway(data_dir.path().to_path_buf(), dead_addr).await;

    let (status, body) = post_screening(gateway_addr, "hello").await;

    assert_eq!(status, reqwest::StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], 502);
}

#[tokio::test]
async fn test_record_listing_over_real_sockets() {
    let data_dir = TempDir::new().expect("temp dir should be created");
    let (scorer_addr, _) = spawn_scorer_stub("0").await;
    let gateway_addr = spawn_gateway(data_dir.path().to_path_buf(), scorer_addr).await;

    post_screening(gateway_addr, "first entry").await;
    post_screening(gateway_addr, "second entry").await;

    let records: Vec<serde_json::Value> = reqwest::Client::new()
        .get(format!("http://{}/api/v1/screenings", gateway_addr))
        .send()
        .await
        .expect("request should reach the gateway")
        .json()
        .await
        .expect("body should be JSON");

    let mut inputs: Vec<&str> = records
        .iter()
        .map(|r| r["input"].as_str().expect("input should be a string"))
        .collect();
    inputs.sort_unstable();
    assert_eq!(inputs, vec!["first entry", "second entry"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_health_check_flag_reports_live_server() {
    let data_dir = TempDir::new().expect("temp dir should be created");
    let (scorer_addr, _) = spawn_scorer_stub("0").await;
    let gateway_addr = spawn_gateway(data_dir.path().to_path_buf(), scorer_addr).await;

    let status = std::process::Command::new(env!("CARGO_BIN_EXE_screengate"))
        .arg("--health-check")
        .env("SCREENGATE_PORT", gateway_addr.port().to_string())
        .status()
        .expect("health check process should run");

    assert!(status.success());
}

#[tokio::test]
async fn test_health_check_flag_reports_dead_server() {
    // Port 9 (discard) refuses connections; no gateway is running there.
    let status = std::process::Command::new(env!("CARGO_BIN_EXE_screengate"))
        .arg("--health-check")
        .env("SCREENGATE_PORT", "9")
        .status()
        .expect("health check process should run");

    assert_eq!(status.code(), Some(1));
}

#[tokio::test]
async fn test_healthz_over_real_sockets() {
    let data_dir = TempDir::new().expect("temp dir should be created");
    let (scorer_addr, _) = spawn_scorer_stub("0").await;
    let gateway_addr = spawn_gateway(data_dir.path().to_path_buf(), scorer_addr).await;

    let response = reqwest::Client::new()
        .get(format!("http://{}/healthz", gateway_addr))
        .send()
        .await
        .expect("request should reach the gateway");

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("body should be JSON");
    assert_eq!(body["status"], "ok");
}
