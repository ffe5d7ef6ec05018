//! Legal research endpoint
//!
//! Search-grounded text generation. The provider's answer, including its
//! grounding metadata and citations, is passed through unchanged.

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult, ErrorResponse},
    routes::{non_empty, reject, track},
    AppState,
};

/// Legal research request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LegalSearchRequest {
    #[serde(default)]
    pub query: Option<String>,
}

/// Answer a legal research query with search grounding
#[utoipa::path(
    post,
    path = "/api/legal-search",
    request_body = LegalSearchRequest,
    responses(
        (status = 200, description = "Grounded provider answer, passed through"),
        (status = 400, description = "Missing query", body = ErrorResponse),
        (status = 500, description = "Provider failure", body = ErrorResponse)
    ),
    tag = "Search"
)]
pub async fn legal_search(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LegalSearchRequest>, JsonRejection>,
) -> AppResult<Json<Value>> {
    const ENDPOINT: &str = "legal-search";

    let Json(request) = payload?;
    let query =
        non_empty(request.query).ok_or_else(|| reject(ENDPOINT, "Query is required"))?;

    info!(query_len = query.len(), "Processing legal search request");

    let start = Instant::now();
    let answer = track(ENDPOINT, start, state.provider.grounded_search(&query).await)
        .map_err(AppError::provider(ENDPOINT, "Failed to perform legal search"))?;

    Ok(Json(answer))
}
