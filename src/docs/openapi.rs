//! OpenAPI specification for the gateway endpoints

use utoipa::OpenApi;

use crate::{
    error::ErrorResponse,
    routes::{
        images::{EditImageForm, GenerateImageRequest, GenerateImageResponse, MergeImagesForm},
        search::LegalSearchRequest,
    },
};

/// OpenAPI specification for the cvisio gateway
#[derive(OpenApi)]
#[openapi(
    info(
        title = "cvisio API",
        version = "1.0.0",
        description = "Gateway for image generation, image editing and merging, and search-grounded legal research"
    ),
    paths(
        crate::routes::images::generate_image,
        crate::routes::images::edit_image,
        crate::routes::images::merge_images,
        crate::routes::search::legal_search
    ),
    components(
        schemas(
            GenerateImageRequest,
            GenerateImageResponse,
            EditImageForm,
            MergeImagesForm,
            LegalSearchRequest,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Images", description = "Image generation, editing and merging"),
        (name = "Search", description = "Search-grounded legal research")
    )
)]
pub struct ApiDoc;
