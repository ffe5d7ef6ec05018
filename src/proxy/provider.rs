//! Generative provider abstraction layer
//!
//! Defines the trait interface the HTTP gateway talks to. Provider-specific
//! request and response shapes stay behind this seam.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::proxy::payload::ImageAttachment;

/// Errors raised while talking to the upstream provider
///
/// These carry full upstream detail for server-side logs. They are never
/// rendered into client responses.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request to provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to encode provider request: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("provider returned an unreadable response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Whether the failure was an outbound timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, ProviderError::Transport(e) if e.is_timeout())
    }
}

/// Result type for provider calls
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Trait defining the capabilities the gateway exposes
///
/// Every method performs exactly one outbound call and returns the provider's
/// response body untouched.
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// Get the provider name for logging and health output
    fn name(&self) -> &'static str;

    /// Text-to-image generation from a prompt
    async fn generate_image(&self, prompt: &str) -> ProviderResult<Value>;

    /// Search-grounded text generation for a legal research query
    async fn grounded_search(&self, query: &str) -> ProviderResult<Value>;

    /// Edit a single image according to a prompt
    async fn edit_image(&self, prompt: &str, image: &ImageAttachment) -> ProviderResult<Value>;

    /// Merge two images according to a prompt
    ///
    /// The images are sent in the order given.
    async fn merge_images(
        &self,
        prompt: &str,
        first: &ImageAttachment,
        second: &ImageAttachment,
    ) -> ProviderResult<Value>;
}
