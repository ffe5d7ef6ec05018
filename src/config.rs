//! Configuration management for cvisio
//!
//! Configuration is loaded once from environment variables at startup and
//! shared read-only with every handler.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Default Generative Language API base URL
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    /// Generative Language API base URL
    pub gemini_api_url: String,
    /// Generative Language API key
    pub gemini_api_key: String,

    /// Model used for text-to-image generation
    pub image_model: String,
    /// Model used for search-grounded legal research
    pub search_model: String,
    /// Model used for image editing and merging
    pub edit_model: String,
    /// Harm block threshold attached to edit and merge calls
    pub safety_threshold: String,

    /// Timeout for a single outbound provider call (in seconds)
    pub upstream_timeout_seconds: u64,
    /// Maximum accepted request body size (in bytes)
    pub max_upload_bytes: usize,

    /// Directory holding the landing page
    pub static_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let gemini_api_key = lookup("GEMINI_API_KEY")
            .or_else(|| lookup("GOOGLE_AI_API_KEY"))
            .filter(|key| !key.trim().is_empty())
            .context("GEMINI_API_KEY (or GOOGLE_AI_API_KEY) must be set")?;

        Ok(Self {
            host: var_or("HOST", "0.0.0.0"),
            port: var_or("PORT", "3000").parse().context("Invalid PORT")?,

            gemini_api_url: var_or("GEMINI_API_URL", DEFAULT_GEMINI_API_URL)
                .trim_end_matches('/')
                .to_string(),
            gemini_api_key,

            image_model: var_or("IMAGE_MODEL", "imagen-3.0-generate-002"),
            search_model: var_or("SEARCH_MODEL", "gemini-2.5-flash-preview-05-20"),
            edit_model: var_or("EDIT_MODEL", "gemini-2.5-flash-image-preview"),
            safety_threshold: var_or("SAFETY_THRESHOLD", "BLOCK_NONE"),

            upstream_timeout_seconds: var_or("UPSTREAM_TIMEOUT_SECONDS", "120")
                .parse()
                .context("Invalid UPSTREAM_TIMEOUT_SECONDS")?,
            max_upload_bytes: var_or("MAX_UPLOAD_BYTES", "20971520")
                .parse()
                .context("Invalid MAX_UPLOAD_BYTES")?,

            static_dir: PathBuf::from(var_or("STATIC_DIR", "public")),
        })
    }

    /// Outbound call timeout as a [`Duration`]
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_seconds)
    }
}
