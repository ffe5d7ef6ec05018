//! Image endpoints
//!
//! - `POST /generate-image`, `POST /api/generate-image` - text-to-image
//! - `POST /api/edit-image` - edit one uploaded image
//! - `POST /api/merge-images` - merge two uploaded images

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{multipart::MultipartRejection, rejection::JsonRejection, Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult, ErrorResponse},
    routes::{non_empty, reject, track, upload::UploadForm},
    AppState,
};

/// Prompt used for merges when the client sends none
pub const DEFAULT_MERGE_PROMPT: &str = "Merge these two images.";

/// Text-to-image request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerateImageRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

/// Text-to-image response envelope
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerateImageResponse {
    pub success: bool,
    /// Provider response, relayed unchanged
    #[schema(value_type = Object)]
    pub data: Value,
}

/// Multipart body of `POST /api/edit-image`
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct EditImageForm {
    /// Edit instruction
    prompt: String,
    /// Image to edit
    #[schema(value_type = String, format = Binary)]
    image: Vec<u8>,
}

/// Multipart body of `POST /api/merge-images`
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct MergeImagesForm {
    /// Merge instruction, defaults to "Merge these two images."
    prompt: Option<String>,
    #[schema(value_type = String, format = Binary)]
    image1: Vec<u8>,
    #[schema(value_type = String, format = Binary)]
    image2: Vec<u8>,
}

/// Generate an image from a text prompt
#[utoipa::path(
    post,
    path = "/api/generate-image",
    request_body = GenerateImageRequest,
    responses(
        (status = 200, description = "Provider result wrapped in a success envelope", body = GenerateImageResponse),
        (status = 400, description = "Missing prompt", body = ErrorResponse),
        (status = 500, description = "Provider failure", body = ErrorResponse)
    ),
    tag = "Images"
)]
pub async fn generate_image(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateImageRequest>, JsonRejection>,
) -> AppResult<Json<GenerateImageResponse>> {
    const ENDPOINT: &str = "generate-image";

    let Json(request) = payload?;
    let prompt =
        non_empty(request.prompt).ok_or_else(|| reject(ENDPOINT, "Prompt is required"))?;

    info!(prompt_len = prompt.len(), "Processing image generation request");

    let start = Instant::now();
    let data = track(ENDPOINT, start, state.provider.generate_image(&prompt).await)
        .map_err(AppError::provider(ENDPOINT, "Failed to generate image"))?;

    Ok(Json(GenerateImageResponse {
        success: true,
        data,
    }))
}

/// Edit an uploaded image according to a prompt
#[utoipa::path(
    post,
    path = "/api/edit-image",
    request_body(content = EditImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Provider result, passed through"),
        (status = 400, description = "Missing prompt or image", body = ErrorResponse),
        (status = 500, description = "Provider failure", body = ErrorResponse)
    ),
    tag = "Images"
)]
pub async fn edit_image(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<Value>> {
    const ENDPOINT: &str = "edit-image";

    let mut form = UploadForm::read(multipart?, ENDPOINT).await?;
    let prompt = form.text("prompt").map(str::to_string);
    let image = form.take_file("image");

    let (Some(prompt), Some(image)) = (prompt, image) else {
        return Err(reject(ENDPOINT, "Prompt and image file are required"));
    };

    info!(
        prompt_len = prompt.len(),
        mime_type = %image.mime_type,
        image_bytes = image.len(),
        "Processing image edit request"
    );

    let start = Instant::now();
    let result = track(ENDPOINT, start, state.provider.edit_image(&prompt, &image).await)
        .map_err(AppError::provider(ENDPOINT, "Failed to edit image"))?;

    Ok(Json(result))
}

/// Merge two uploaded images
#[utoipa::path(
    post,
    path = "/api/merge-images",
    request_body(content = MergeImagesForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Provider result, passed through"),
        (status = 400, description = "Missing image1 or image2", body = ErrorResponse),
        (status = 500, description = "Provider failure", body = ErrorResponse)
    ),
    tag = "Images"
)]
pub async fn merge_images(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<Value>> {
    const ENDPOINT: &str = "merge-images";

    let mut form = UploadForm::read(multipart?, ENDPOINT).await?;
    let prompt = form.text("prompt").unwrap_or(DEFAULT_MERGE_PROMPT).to_string();

    let (Some(first), Some(second)) = (form.take_file("image1"), form.take_file("image2")) else {
        return Err(reject(ENDPOINT, "Two image files are required"));
    };

    info!(
        prompt_len = prompt.len(),
        image1_bytes = first.len(),
        image2_bytes = second.len(),
        "Processing image merge request"
    );

    let start = Instant::now();
    let result = track(
        ENDPOINT,
        start,
        state.provider.merge_images(&prompt, &first, &second).await,
    )
    .map_err(AppError::provider(ENDPOINT, "Failed to merge images"))?;

    Ok(Json(result))
}
