//! HTTP routes for cvisio
//!
//! This module defines all HTTP endpoints exposed by the gateway.

pub mod docs;
pub mod health;
pub mod images;
pub mod metrics;
pub mod search;
pub mod upload;

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{error::AppError, proxy::ProviderResult, AppState};

/// Keep a required text value only when it is present and not empty
///
/// Whitespace is content; `"   "` is passed to the provider as sent.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Record the provider outcome for an endpoint
pub(crate) fn track<T>(
    endpoint: &str,
    start: Instant,
    result: ProviderResult<T>,
) -> ProviderResult<T> {
    let status = if result.is_ok() { "success" } else { "error" };
    metrics::record_request(endpoint, status, start.elapsed().as_secs_f64());
    result
}

/// Reject a request before any provider call
pub(crate) fn reject(endpoint: &str, message: &str) -> AppError {
    metrics::record_rejection(endpoint);
    AppError::BadRequest(message.to_string())
}

/// Create the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Capability endpoints; each one makes a single provider call.
    // The unprefixed paths are kept for older frontends.
    let api_routes = Router::new()
        .route("/generate-image", post(images::generate_image))
        .route("/api/generate-image", post(images::generate_image))
        .route("/legal-search", post(search::legal_search))
        .route("/api/legal-search", post(search::legal_search))
        .route("/api/edit-image", post(images::edit_image))
        .route("/api/merge-images", post(images::merge_images))
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes));

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .route("/metrics", get(metrics::prometheus_metrics));

    // Landing page and its assets
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .merge(docs::create_docs_router())
        .fallback_service(static_files)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}
