//! Header utilities for provider calls
//!
//! The API key is sent as a header so it never appears in request URLs, and
//! upstream error text is scrubbed of it before being logged.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue, CONTENT_TYPE};

/// Header carrying the Generative Language API key
pub const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-goog-api-key");

/// Placeholder substituted for the API key in logged text
const REDACTED: &str = "[REDACTED]";

/// Build default headers for provider requests
///
/// Client headers are never forwarded; every call carries only the API key
/// and a JSON content type.
pub fn build_default_headers(api_key: &str) -> Result<HeaderMap, InvalidHeaderValue> {
    let mut headers = HeaderMap::new();

    let mut key = HeaderValue::from_str(api_key)?;
    key.set_sensitive(true);
    headers.insert(API_KEY_HEADER, key);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Ok(headers)
}

/// Remove every occurrence of the API key from `text`
pub fn redact_api_key(text: &str, api_key: &str) -> String {
    if api_key.is_empty() {
        return text.to_string();
    }
    text.replace(api_key, REDACTED)
}
