//! cvisio - Gateway to Google's generative vision and search models
//!
//! This library provides the HTTP gateway that validates browser requests,
//! forwards each one as a single call to the Generative Language API, and
//! relays the answer.

pub mod config;
pub mod docs;
pub mod error;
pub mod proxy;
pub mod routes;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;

pub use crate::config::Config;
pub use crate::proxy::{GeminiProvider, GenerativeProvider, ImageAttachment};

/// Application state shared across all request handlers
///
/// Immutable after startup; handlers only read from it.
pub struct AppState {
    pub config: Config,
    pub start_time: Instant,
    /// Provider every capability endpoint delegates to
    pub provider: Arc<dyn GenerativeProvider>,
}

impl AppState {
    /// Create a new application state backed by the Gemini provider
    pub fn new(config: Config) -> Result<Self> {
        // Initialize HTTP client with connection pooling
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(32)
            .timeout(config.upstream_timeout())
            .user_agent(concat!("cvisio/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let provider: Arc<dyn GenerativeProvider> =
            Arc::new(GeminiProvider::new(http_client, &config)?);

        Ok(Self::with_provider(config, provider))
    }

    /// Create application state around an existing provider
    pub fn with_provider(config: Config, provider: Arc<dyn GenerativeProvider>) -> Self {
        Self {
            config,
            start_time: Instant::now(),
            provider,
        }
    }
}
