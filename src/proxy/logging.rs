//! Request logging utilities for provider calls
//!
//! Structured logging with a short correlation ID so a single upstream call
//! can be followed through the logs.

use std::time::Instant;
use tracing::{debug, info, Span};
use uuid::Uuid;

/// Context for tracking one provider call
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique identifier for this call (for log correlation)
    pub trace_id: String,
    /// When the call started
    pub start_time: Instant,
    /// Provider handling this call
    pub provider: String,
    /// Capability being invoked (generate-image, legal-search, ...)
    pub capability: String,
    /// Model being used
    pub model: Option<String>,
    /// Number of inline images attached
    pub images: usize,
}

impl RequestContext {
    /// Create a new request context
    pub fn new(provider: &str, capability: &str) -> Self {
        Self {
            trace_id: Uuid::new_v4().to_string()[..8].to_string(), // Short ID for readability
            start_time: Instant::now(),
            provider: provider.to_string(),
            capability: capability.to_string(),
            model: None,
            images: 0,
        }
    }

    /// Set the model for this call
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Record how many images are attached
    pub fn with_images(mut self, images: usize) -> Self {
        self.images = images;
        self
    }

    /// Get elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u128 {
        self.start_time.elapsed().as_millis()
    }

    /// Log call initiation
    pub fn log_request_start(&self) {
        info!(
            trace_id = %self.trace_id,
            provider = %self.provider,
            capability = %self.capability,
            model = ?self.model,
            images = %self.images,
            "Provider call started"
        );
    }

    /// Log request being sent to upstream
    pub fn log_upstream_request(&self, url: &str, body_size: usize) {
        debug!(
            trace_id = %self.trace_id,
            provider = %self.provider,
            url = %url,
            body_size = %body_size,
            elapsed_ms = %self.elapsed_ms(),
            "Sending request to upstream"
        );
    }

    /// Log response received from upstream
    pub fn log_upstream_response(&self, status: u16, content_length: Option<u64>) {
        info!(
            trace_id = %self.trace_id,
            provider = %self.provider,
            capability = %self.capability,
            status = %status,
            content_length = ?content_length,
            elapsed_ms = %self.elapsed_ms(),
            "Response received from upstream"
        );
    }

    /// Log successful call completion
    pub fn log_request_complete(&self) {
        info!(
            trace_id = %self.trace_id,
            provider = %self.provider,
            capability = %self.capability,
            model = ?self.model,
            elapsed_ms = %self.elapsed_ms(),
            "Provider call completed"
        );
    }

    /// Create a tracing span for this call
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "provider_call",
            trace_id = %self.trace_id,
            provider = %self.provider,
            capability = %self.capability,
            model = ?self.model,
        )
    }
}
