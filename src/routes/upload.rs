//! Multipart upload parsing
//!
//! Collects text fields and image files from a `multipart/form-data` body.
//! Files stay in memory for the lifetime of the request only.

use std::collections::HashMap;

use axum::extract::Multipart;
use tracing::debug;

use crate::{error::AppResult, proxy::ImageAttachment, routes::metrics::record_upload};

/// Content type assumed when the client does not send one
const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Parsed multipart form
#[derive(Debug, Default)]
pub struct UploadForm {
    fields: HashMap<String, String>,
    files: HashMap<String, ImageAttachment>,
}

impl UploadForm {
    /// Drain a multipart body into memory
    ///
    /// A part counts as a file when it carries a file name or a non-text
    /// content type. Empty files are dropped. The first occurrence of a name
    /// wins.
    pub async fn read(mut multipart: Multipart, endpoint: &'static str) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            let is_file = field.file_name().is_some()
                || field
                    .content_type()
                    .is_some_and(|ct| !ct.starts_with("text/"));

            if is_file {
                let mime_type = field
                    .content_type()
                    .unwrap_or(FALLBACK_MIME_TYPE)
                    .to_string();
                let data = field.bytes().await?;

                debug!(field = %name, mime_type = %mime_type, size = data.len(), "Received file part");
                if data.is_empty() {
                    continue;
                }

                record_upload(endpoint, data.len() as u64);
                form.files
                    .entry(name)
                    .or_insert_with(|| ImageAttachment::new(data, mime_type));
            } else {
                let value = field.text().await?;
                form.fields.entry(name).or_insert(value);
            }
        }

        Ok(form)
    }

    /// Text field value, if present and not empty
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Take ownership of an uploaded file
    pub fn take_file(&mut self, name: &str) -> Option<ImageAttachment> {
        self.files.remove(name)
    }
}
