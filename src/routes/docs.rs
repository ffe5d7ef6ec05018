//! Documentation endpoint
//!
//! Serves the raw OpenAPI spec at `/docs/openapi.json`.

use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use crate::docs::ApiDoc;

/// Handler for OpenAPI JSON endpoint
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Create the docs router
///
/// Generic over the state type so it can be merged into the main router.
pub fn create_docs_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/docs/openapi.json", get(openapi_json))
}
