//! Integration tests for the remote platform against an in-process fake.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};

use qmodel_adapter_remote::{RemoteConfig, RemotePlatform};
use qmodel_hal::{HalError, Platform};
use qmodel_ir::{Model, build_model};

// ============================================================================
// Fake platform
// ============================================================================

const TOKEN: &str = "test-token";

#[derive(Default)]
struct Fake {
    /// Extra counts added to every execution response.
    miscount: u64,
    /// Delay before answering execution requests.
    execution_delay: Duration,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

fn model_width(model: &Value) -> u64 {
    model["registers"]
        .as_array()
        .map(|regs| regs.iter().filter_map(|r| r["size"].as_u64()).sum())
        .unwrap_or(0)
}

async fn synthesize(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, "invalid bearer token").into_response();
    }
    let model = &body["model"];
    if model.to_string().contains("\"CCX\"") {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": "unsupported_gate",
                "message": "gate ccx is not supported on this device"
            })),
        )
            .into_response();
    }
    let name = model["name"].as_str().unwrap_or("unnamed");
    Json(json!({
        "program_id": format!("prog-{name}"),
        "program": { "width": model_width(model) },
    }))
    .into_response()
}

async fn execute(
    State(fake): State<Arc<Fake>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, "invalid bearer token").into_response();
    }
    tokio::time::sleep(fake.execution_delay).await;

    if body["program_id"] == "prog-doomed" {
        return (StatusCode::SERVICE_UNAVAILABLE, "device offline for calibration").into_response();
    }

    let width = body["program"]["width"].as_u64().unwrap_or(1) as usize;
    let shots = body["shots"].as_u64().unwrap_or(0);
    let zeros = shots / 2;
    let ones = (shots - zeros).saturating_add(fake.miscount);
    Json(json!({
        "counts": { ("0".repeat(width)): zeros, ("1".repeat(width)): ones },
        "execution_time_ms": 12,
    }))
    .into_response()
}

async fn spawn(fake: Fake) -> String {
    let app = Router::new()
        .route("/v1/synthesis", post(synthesize))
        .route("/v1/execution", post(execute))
        .with_state(Arc::new(fake));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn config(endpoint: &str, token: &str) -> RemoteConfig {
    let mut config = RemoteConfig::default().with_endpoint(endpoint);
    config.token = Some(token.to_string());
    config
}

fn platform(endpoint: &str) -> RemotePlatform {
    RemotePlatform::from_remote_config(&config(endpoint, TOKEN)).unwrap()
}

// ============================================================================
// Success paths
// ============================================================================

#[tokio::test]
async fn test_synthesize_and_execute() {
    let endpoint = spawn(Fake::default()).await;
    let platform = platform(&endpoint);

    let program = platform.synthesize(&Model::entangle().unwrap()).await.unwrap();
    assert_eq!(program.id.0, "prog-entangle");
    assert_eq!(program.model_name, "entangle");
    assert_eq!(program.platform.as_deref(), Some("remote"));
    assert_eq!(program.payload["width"], 2);

    let result = platform.execute(&program, 2048).await.unwrap();
    assert_eq!(result.counts.total_shots(), 2048);
    assert_eq!(result.counts.get("00"), 1024);
    assert_eq!(result.counts.get("11"), 1024);
    assert_eq!(result.execution_time_ms, Some(12));
    assert_eq!(result.program_id, Some(program.id.clone()));
}

#[tokio::test]
async fn test_session_sample() {
    let endpoint = spawn(Fake::default()).await;
    let session = RemotePlatform::session(&config(&endpoint, TOKEN)).unwrap();

    let (program, result) = session.sample(&Model::ghz(3).unwrap(), 101).await.unwrap();
    assert_eq!(program.id.0, "prog-ghz");
    assert_eq!(result.counts.total_shots(), 101);
    assert!(session.show(&program).await.is_ok());
}

// ============================================================================
// Error paths
// ============================================================================

#[tokio::test]
async fn test_synthesis_error_is_verbatim() {
    let endpoint = spawn(Fake::default()).await;
    let model = build_model("toffoli", |b| {
        let q = b.allocate(3, "q")?;
        b.ccx(q.bit(0), q.bit(1), q.bit(2))?;
        Ok(())
    })
    .unwrap();

    let err = platform(&endpoint).synthesize(&model).await.unwrap_err();
    assert!(
        matches!(err, HalError::Synthesis(ref msg) if msg == "gate ccx is not supported on this device"),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn test_execution_error_plain_text() {
    let endpoint = spawn(Fake::default()).await;
    let platform = platform(&endpoint);
    let model = build_model("doomed", |b| {
        let q = b.allocate(1, "q")?;
        b.h(q.bit(0))?;
        Ok(())
    })
    .unwrap();

    let program = platform.synthesize(&model).await.unwrap();
    let err = platform.execute(&program, 10).await.unwrap_err();
    assert!(
        matches!(err, HalError::Execution(ref msg) if msg == "device offline for calibration"),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn test_unauthorized_maps_to_authentication_failed() {
    let endpoint = spawn(Fake::default()).await;
    let platform = RemotePlatform::from_remote_config(&config(&endpoint, "wrong-token")).unwrap();

    let err = platform
        .synthesize(&Model::entangle().unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, HalError::AuthenticationFailed(ref msg) if msg == "invalid bearer token"));
}

#[tokio::test]
async fn test_count_mismatch_is_execution_error() {
    let endpoint = spawn(Fake {
        miscount: 5,
        ..Fake::default()
    })
    .await;
    let platform = platform(&endpoint);

    let program = platform.synthesize(&Model::entangle().unwrap()).await.unwrap();
    let err = platform.execute(&program, 100).await.unwrap_err();
    assert!(matches!(err, HalError::Execution(ref msg) if msg.contains("105")));
}

#[tokio::test]
async fn test_overflowing_counts_are_execution_error() {
    let endpoint = spawn(Fake {
        miscount: u64::MAX,
        ..Fake::default()
    })
    .await;
    let platform = platform(&endpoint);

    let program = platform.synthesize(&Model::entangle().unwrap()).await.unwrap();
    let err = platform.execute(&program, 100).await.unwrap_err();
    assert!(
        matches!(err, HalError::Execution(ref msg) if msg == "counts overflow"),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn test_zero_shots_rejected() {
    let endpoint = spawn(Fake::default()).await;
    let session = RemotePlatform::session(&config(&endpoint, TOKEN)).unwrap();
    let program = session.submit(&Model::entangle().unwrap()).await.unwrap();

    assert!(matches!(
        session.run(&program, 0).await.unwrap_err(),
        HalError::InvalidShots(_)
    ));
}

#[tokio::test]
async fn test_session_execution_timeout() {
    let endpoint = spawn(Fake {
        execution_delay: Duration::from_secs(5),
        ..Fake::default()
    })
    .await;
    let mut config = config(&endpoint, TOKEN);
    config.execution_timeout_secs = Some(1);
    let session = RemotePlatform::session(&config).unwrap();

    let program = session.submit(&Model::entangle().unwrap()).await.unwrap();
    let err = session.run(&program, 10).await.unwrap_err();
    assert!(matches!(err, HalError::Timeout(_)), "unexpected error: {err}");
}

#[tokio::test]
async fn test_unreachable_endpoint_is_network_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = platform(&format!("http://{addr}"))
        .synthesize(&Model::entangle().unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, HalError::Network(_)), "unexpected error: {err}");
}
