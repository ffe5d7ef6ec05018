//! Mock infrastructure for testing external services
//!
//! Wiremock-based stand-in for the Generative Language API. Mocks support
//! success, error status, malformed body and slow reply scenarios.


pub use gemini::*;
