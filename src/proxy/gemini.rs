//! Google Generative Language API provider
//!
//! Issues raw REST calls to the `:predict` and `:generateContent` endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, InvalidHeaderValue};
use serde::Serialize;
use serde_json::Value;
use tracing::Instrument;

use crate::{
    config::Config,
    proxy::{
        headers::{build_default_headers, redact_api_key},
        logging::RequestContext,
        payload::{GenerateContentRequest, ImageAttachment, PredictRequest},
        provider::{GenerativeProvider, ProviderError, ProviderResult},
    },
};

/// Generative Language API client
pub struct GeminiProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    headers: HeaderMap,
    image_model: String,
    search_model: String,
    edit_model: String,
    safety_threshold: String,
    timeout: Duration,
}

impl GeminiProvider {
    /// Create a new provider client
    ///
    /// Fails only when the API key cannot be carried in a header.
    pub fn new(client: reqwest::Client, config: &Config) -> Result<Self, InvalidHeaderValue> {
        Ok(Self {
            client,
            base_url: config.gemini_api_url.clone(),
            api_key: config.gemini_api_key.clone(),
            headers: build_default_headers(&config.gemini_api_key)?,
            image_model: config.image_model.clone(),
            search_model: config.search_model.clone(),
            edit_model: config.edit_model.clone(),
            safety_threshold: config.safety_threshold.clone(),
            timeout: config.upstream_timeout(),
        })
    }

    /// URL of a model method, e.g. `{base}/models/{model}:predict`
    fn model_url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.base_url, model, method)
    }

    /// Run one provider call with logging around it
    ///
    /// Failures are returned, not logged; the handler boundary logs them.
    async fn execute<T: Serialize>(
        &self,
        ctx: RequestContext,
        url: String,
        body: &T,
    ) -> ProviderResult<Value> {
        ctx.log_request_start();

        let result = self
            .post(&ctx, &url, body)
            .instrument(ctx.create_span())
            .await;

        if result.is_ok() {
            ctx.log_request_complete();
        }

        result
    }

    /// Make a POST request to the provider
    async fn post<T: Serialize>(
        &self,
        ctx: &RequestContext,
        url: &str,
        body: &T,
    ) -> ProviderResult<Value> {
        let payload = serde_json::to_vec(body)?;
        ctx.log_upstream_request(url, payload.len());

        let response = self
            .client
            .post(url)
            .headers(self.headers.clone())
            .timeout(self.timeout)
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        ctx.log_upstream_response(status.as_u16(), response.content_length());

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: redact_api_key(&text, &self.api_key),
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ProviderError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl GenerativeProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn generate_image(&self, prompt: &str) -> ProviderResult<Value> {
        let ctx = RequestContext::new(self.name(), "generate-image").with_model(&self.image_model);
        let url = self.model_url(&self.image_model, "predict");
        self.execute(ctx, url, &PredictRequest::for_prompt(prompt))
            .await
    }

    async fn grounded_search(&self, query: &str) -> ProviderResult<Value> {
        let ctx = RequestContext::new(self.name(), "legal-search").with_model(&self.search_model);
        let url = self.model_url(&self.search_model, "generateContent");
        self.execute(ctx, url, &GenerateContentRequest::grounded_search(query))
            .await
    }

    async fn edit_image(&self, prompt: &str, image: &ImageAttachment) -> ProviderResult<Value> {
        let ctx = RequestContext::new(self.name(), "edit-image")
            .with_model(&self.edit_model)
            .with_images(1);
        let url = self.model_url(&self.edit_model, "generateContent");
        let body =
            GenerateContentRequest::prompt_with_images(prompt, &[image], &self.safety_threshold);
        self.execute(ctx, url, &body).await
    }

    async fn merge_images(
        &self,
        prompt: &str,
        first: &ImageAttachment,
        second: &ImageAttachment,
    ) -> ProviderResult<Value> {
        let ctx = RequestContext::new(self.name(), "merge-images")
            .with_model(&self.edit_model)
            .with_images(2);
        let url = self.model_url(&self.edit_model, "generateContent");
        let body = GenerateContentRequest::prompt_with_images(
            prompt,
            &[first, second],
            &self.safety_threshold,
        );
        self.execute(ctx, url, &body).await
    }
}
