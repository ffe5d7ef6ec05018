//! Text-to-image endpoint tests
//!
//! - POST /generate-image and /api/generate-image
//! - Validation, success envelope, provider failure

use axum::http::StatusCode;
use bytes::Bytes;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{
    assert_error_body, constants::SECRET_PROVIDER_DETAIL, test_server, StubProvider,
};

#[tokio::test]
async fn test_missing_prompt_returns_400_without_provider_call() {
    let provider = StubProvider::succeeding(json!({ "predictions": [] }));
    let server = test_server(provider.clone());

    let response = server.post("/api/generate-image").json(&json!({})).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_error_body(&response, "Prompt is required");
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_empty_prompt_returns_400() {
    let provider = StubProvider::succeeding(json!({}));
    let server = test_server(provider.clone());

    let response = server
        .post("/generate-image")
        .json(&json!({ "prompt": "" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_error_body(&response, "Prompt is required");
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_whitespace_prompt_is_forwarded_as_sent() {
    let provider = StubProvider::succeeding(json!({ "predictions": [] }));
    let server = test_server(provider.clone());

    let response = server
        .post("/api/generate-image")
        .json(&json!({ "prompt": "   " }))
        .await;

    response.assert_status_ok();
    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].text, "   ");
}

#[tokio::test]
async fn test_malformed_json_returns_400_with_error_key() {
    let provider = StubProvider::succeeding(json!({}));
    let server = test_server(provider.clone());

    let response = server
        .post("/api/generate-image")
        .content_type("application/json")
        .bytes(Bytes::from_static(b"{ not json"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].is_string());
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_success_wraps_provider_payload() {
    let payload = json!({
        "predictions": [{ "bytesBase64Encoded": "AAAA", "mimeType": "image/png" }]
    });
    let provider = StubProvider::succeeding(payload.clone());
    let server = test_server(provider.clone());

    for path in ["/generate-image", "/api/generate-image"] {
        let response = server
            .post(path)
            .json(&json!({ "prompt": "a lighthouse at dusk" }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body, json!({ "success": true, "data": payload }));
    }

    let calls = provider.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].capability, "generate-image");
    assert_eq!(calls[0].text, "a lighthouse at dusk");
    assert!(calls[0].images.is_empty());
}

#[tokio::test]
async fn test_provider_failure_returns_generic_500() {
    let provider = StubProvider::failing();
    let server = test_server(provider.clone());

    let response = server
        .post("/api/generate-image")
        .json(&json!({ "prompt": "a lighthouse" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_error_body(&response, "Failed to generate image");
    assert!(!response.text().contains(SECRET_PROVIDER_DETAIL));
    assert_eq!(provider.call_count(), 1);
}
