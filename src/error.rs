//! Error types for cvisio
//!
//! Every failure leaving a handler is rendered as `{ "error": "<message>" }`.
//! Provider detail is logged, never rendered.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

use crate::proxy::ProviderError;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{message}")]
    Provider {
        message: &'static str,
        #[source]
        source: ProviderError,
    },
}

impl AppError {
    /// Map a provider failure to the generic message of `endpoint`
    ///
    /// The underlying error is logged here, at the handler boundary. This is
    /// the only place a provider failure is logged.
    pub fn provider(
        endpoint: &'static str,
        message: &'static str,
    ) -> impl FnOnce(ProviderError) -> AppError {
        move |source| {
            error!(
                endpoint = %endpoint,
                timeout = source.is_timeout(),
                error = %source,
                "{}",
                message
            );
            AppError::Provider { message, source }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::BadRequest(format!("Invalid multipart body: {}", err))
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Provider { message, .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
