//! Proxy module
//!
//! Handles request forwarding to the upstream generative AI provider.

pub mod gemini;
pub mod headers;
pub mod logging;
pub mod payload;
pub mod provider;

pub use gemini::GeminiProvider;
pub use payload::{ImageAttachment, InlineData};
pub use provider::{GenerativeProvider, ProviderError, ProviderResult};
