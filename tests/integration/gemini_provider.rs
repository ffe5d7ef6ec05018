//! End-to-end tests through the real Gemini provider
//!
//! The router is wired to `GeminiProvider`, which talks to a wiremock server.
//! These tests pin the outbound payload shapes and the failure mapping.

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use cvisio::proxy::payload::LEGAL_SYSTEM_PROMPT;
use cvisio::{GeminiProvider, GenerativeProvider};

use crate::common::{
    assert_error_body, constants::TEST_API_KEY, post_multipart, test_config,
    test_server_with_config, MultipartBody,
};
use crate::mocks::{
    GeminiTestData, MockGemini, EDIT_MODEL_PATH, IMAGE_MODEL_PATH, SEARCH_MODEL_PATH,
};

/// Router backed by a real provider pointing at `mock`
fn gateway_for(mock: &MockGemini, extra: &[(&str, &str)]) -> TestServer {
    let config = test_config(&mock.uri(), extra);
    let provider: Arc<dyn GenerativeProvider> = Arc::new(
        GeminiProvider::new(reqwest::Client::new(), &config).expect("valid API key header"),
    );
    test_server_with_config(config, provider)
}

#[tokio::test]
async fn test_generate_image_sends_predict_payload() {
    let mock = MockGemini::start().await;
    mock.mock_predict_success(GeminiTestData::predict_response())
        .await;
    let server = gateway_for(&mock, &[]);

    let response = server
        .post("/generate-image")
        .json(&json!({ "prompt": "a paper crane" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({ "success": true, "data": GeminiTestData::predict_response() })
    );

    let requests = mock.received_requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), IMAGE_MODEL_PATH);
    assert!(requests[0].url.query().is_none(), "API key must not be in the URL");
    assert_eq!(
        requests[0].headers.get("x-goog-api-key").unwrap().to_str().unwrap(),
        TEST_API_KEY
    );

    let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        sent,
        json!({ "instances": [{ "prompt": "a paper crane" }], "parameters": { "sampleCount": 1 } })
    );
}

#[tokio::test]
async fn test_legal_search_enables_grounding() {
    let mock = MockGemini::start().await;
    mock.mock_success(SEARCH_MODEL_PATH, GeminiTestData::grounded_response())
        .await;
    let server = gateway_for(&mock, &[]);

    let response = server
        .post("/api/legal-search")
        .json(&json!({ "query": "minimum wage" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body, GeminiTestData::grounded_response());

    let sent = mock.received_bodies().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0],
        json!({
            "contents": [{ "role": "user", "parts": [{ "text": "minimum wage" }] }],
            "tools": [{ "google_search": {} }],
            "systemInstruction": { "parts": [{ "text": LEGAL_SYSTEM_PROMPT }] }
        })
    );
}

#[tokio::test]
async fn test_edit_image_sends_inline_data() {
    let mock = MockGemini::start().await;
    mock.mock_success(EDIT_MODEL_PATH, GeminiTestData::image_response())
        .await;
    let server = gateway_for(&mock, &[]);

    let form = MultipartBody::new()
        .text("prompt", "make it night")
        .file("image", "day.jpg", "image/jpeg", b"day");
    let response = post_multipart(&server, "/api/edit-image", form).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body, GeminiTestData::image_response());

    let sent = mock.received_bodies().await;
    assert_eq!(
        sent[0]["contents"],
        json!([{
            "role": "user",
            "parts": [
                { "text": "make it night" },
                { "inlineData": { "mimeType": "image/jpeg", "data": "ZGF5" } }
            ]
        }])
    );
    let thresholds: Vec<&Value> = sent[0]["safetySettings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|setting| &setting["threshold"])
        .collect();
    assert_eq!(thresholds.len(), 4);
    assert!(thresholds.iter().all(|t| *t == "BLOCK_NONE"));
}

#[tokio::test]
async fn test_merge_images_sends_both_parts_with_default_prompt() {
    let mock = MockGemini::start().await;
    mock.mock_success(EDIT_MODEL_PATH, GeminiTestData::image_response())
        .await;
    let server = gateway_for(&mock, &[("SAFETY_THRESHOLD", "BLOCK_ONLY_HIGH")]);

    let form = MultipartBody::new()
        .file("image1", "a.png", "image/png", b"one")
        .file("image2", "b.png", "image/png", b"two");
    let response = post_multipart(&server, "/api/merge-images", form).await;

    response.assert_status_ok();

    let sent = mock.received_bodies().await;
    assert_eq!(
        sent[0]["contents"][0]["parts"],
        json!([
            { "text": "Merge these two images." },
            { "inlineData": { "mimeType": "image/png", "data": "b25l" } },
            { "inlineData": { "mimeType": "image/png", "data": "dHdv" } }
        ])
    );
    assert_eq!(sent[0]["safetySettings"][0]["threshold"], "BLOCK_ONLY_HIGH");
}

#[tokio::test]
async fn test_provider_error_status_maps_to_500() {
    let mock = MockGemini::start().await;
    mock.mock_error(IMAGE_MODEL_PATH, 400, "API key not valid. Please pass a valid API key.")
        .await;
    let server = gateway_for(&mock, &[]);

    let response = server
        .post("/api/generate-image")
        .json(&json!({ "prompt": "a paper crane" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_error_body(&response, "Failed to generate image");
    assert!(!response.text().contains("API key not valid"));
    assert!(!response.text().contains(TEST_API_KEY));
}

#[tokio::test]
async fn test_non_json_provider_body_maps_to_500() {
    let mock = MockGemini::start().await;
    mock.mock_non_json(SEARCH_MODEL_PATH).await;
    let server = gateway_for(&mock, &[]);

    let response = server
        .post("/legal-search")
        .json(&json!({ "query": "zoning" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_error_body(&response, "Failed to perform legal search");
}

#[tokio::test]
async fn test_slow_provider_times_out_as_500() {
    let mock = MockGemini::start().await;
    mock.mock_slow(IMAGE_MODEL_PATH, Duration::from_secs(5)).await;
    let server = gateway_for(&mock, &[("UPSTREAM_TIMEOUT_SECONDS", "1")]);

    let response = server
        .post("/api/generate-image")
        .json(&json!({ "prompt": "a paper crane" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_error_body(&response, "Failed to generate image");
}

#[tokio::test]
async fn test_unreachable_provider_maps_to_500() {
    // Nothing listens on the discard port
    let config = test_config("http://127.0.0.1:9", &[]);
    let provider = GeminiProvider::new(reqwest::Client::new(), &config).unwrap();

    let err = provider.generate_image("a paper crane").await.unwrap_err();
    assert!(matches!(err, cvisio::proxy::ProviderError::Transport(_)));
}
