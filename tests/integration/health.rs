//! Health, metrics, docs and landing page tests
//!
//! - GET /health, /health/ready, /health/live
//! - GET /metrics
//! - GET /docs/openapi.json
//! - GET / (static landing page)

use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{
    landing_page_dir, test_config, test_server, test_server_with_config, StubProvider,
};

#[tokio::test]
async fn test_health_endpoint_returns_proper_structure() {
    let server = test_server(StubProvider::succeeding(json!({})));

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["provider"], "stub");
    assert!(body["uptime_seconds"].is_u64());
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_probes_return_healthy() {
    let server = test_server(StubProvider::succeeding(json!({})));

    for path in ["/health/live", "/health/ready"] {
        let response = server.get(path).await;
        response.assert_status_ok();
        response.assert_json(&json!({ "status": "healthy" }));
    }
}

#[tokio::test]
async fn test_metrics_endpoint_renders_text() {
    let server = test_server(StubProvider::succeeding(json!({})));

    server
        .post("/api/generate-image")
        .json(&json!({ "prompt": "a comet" }))
        .await
        .assert_status_ok();

    let response = server.get("/metrics").await;
    response.assert_status_ok();
    let text = response.text();
    assert!(text.contains("cvisio_requests_total"), "missing counter: {text}");
    assert!(text.contains("endpoint=\"generate-image\""));
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let server = test_server(StubProvider::succeeding(json!({})));

    let response = server.get("/docs/openapi.json").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["paths"]["/api/edit-image"]["post"].is_object());
    assert!(body["paths"]["/api/legal-search"]["post"].is_object());
}

#[tokio::test]
async fn test_landing_page_is_served_from_static_dir() {
    let dir = landing_page_dir("<h1>Creative Vision</h1>");
    let config = test_config(
        "http://127.0.0.1:9",
        &[("STATIC_DIR", dir.to_str().unwrap())],
    );
    let server = test_server_with_config(config, StubProvider::succeeding(json!({})));

    let response = server.get("/").await;

    response.assert_status_ok();
    assert!(response.text().contains("Creative Vision"));

    server
        .get("/missing.css")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    std::fs::remove_dir_all(dir).ok();
}
