//! Prometheus metrics endpoint
//!
//! Exposes application metrics in Prometheus format for monitoring.

use axum::response::IntoResponse;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;

/// Global Prometheus handle for metrics export
static PROMETHEUS_HANDLE: Lazy<PrometheusHandle> = Lazy::new(|| {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder")
});

/// Initialize metrics (call once at startup)
pub fn init_metrics() {
    // Force initialization of the lazy static
    let _ = &*PROMETHEUS_HANDLE;

    register_metrics();
}

/// Register all custom metrics
fn register_metrics() {
    metrics::describe_counter!(
        "cvisio_requests_total",
        "Total number of gateway requests by endpoint and outcome"
    );
    metrics::describe_histogram!(
        "cvisio_provider_duration_seconds",
        "Provider call duration in seconds"
    );
    metrics::describe_counter!(
        "cvisio_upload_bytes_total",
        "Total bytes of uploaded images"
    );
}

/// Prometheus metrics endpoint handler
///
/// Returns metrics in Prometheus text format for scraping.
pub async fn prometheus_metrics() -> impl IntoResponse {
    PROMETHEUS_HANDLE.render()
}

/// Record a request that reached the provider
pub fn record_request(endpoint: &str, status: &str, duration_secs: f64) {
    metrics::counter!("cvisio_requests_total", "endpoint" => endpoint.to_string(), "status" => status.to_string())
        .increment(1);
    metrics::histogram!("cvisio_provider_duration_seconds", "endpoint" => endpoint.to_string())
        .record(duration_secs);
}

/// Record a request rejected by validation
pub fn record_rejection(endpoint: &str) {
    metrics::counter!("cvisio_requests_total", "endpoint" => endpoint.to_string(), "status" => "invalid")
        .increment(1);
}

/// Record an uploaded image
pub fn record_upload(endpoint: &str, bytes: u64) {
    metrics::counter!("cvisio_upload_bytes_total", "endpoint" => endpoint.to_string())
        .increment(bytes);
}
