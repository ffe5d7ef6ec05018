//! Request payloads for the Generative Language REST API
//!
//! Only the fields this gateway sends are modelled. Responses are relayed as
//! opaque JSON and have no types here.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// System instruction attached to every legal research call
pub const LEGAL_SYSTEM_PROMPT: &str = "You are a professional legal assistant. Your task is to find official laws and legal articles based on the user's query. Use the search tool to find the most accurate and up-to-date information from official government or legal sources. Provide a clear summary of the law, and you MUST cite your sources.";

/// Number of images requested from the image generation model
pub const IMAGE_SAMPLE_COUNT: u32 = 1;

/// An uploaded image held in memory for the duration of one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub data: Bytes,
    pub mime_type: String,
}

impl ImageAttachment {
    pub fn new(data: impl Into<Bytes>, mime_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Binary media encoded as base64 and tagged with its mime type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

impl InlineData {
    /// Decode back into the raw attachment
    pub fn decode(&self) -> Result<ImageAttachment, base64::DecodeError> {
        let bytes = STANDARD.decode(self.data.as_bytes())?;
        Ok(ImageAttachment::new(bytes, self.mime_type.clone()))
    }
}

impl From<&ImageAttachment> for InlineData {
    fn from(image: &ImageAttachment) -> Self {
        Self {
            mime_type: image.mime_type.clone(),
            data: STANDARD.encode(&image.data),
        }
    }
}

/// One fragment of a multi-part prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Part {
    Text(String),
    InlineData(InlineData),
}

/// A turn of content sent to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<Part>,
}

impl Content {
    /// User turn with the given parts
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts,
        }
    }

    /// Role-less content, as used for system instructions
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part::Text(text.into())],
        }
    }
}

/// Empty marker enabling Google Search grounding
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoogleSearch {}

/// Tool declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    #[serde(rename = "google_search", skip_serializing_if = "Option::is_none")]
    pub google_search: Option<GoogleSearch>,
}

impl Tool {
    pub fn google_search() -> Self {
        Self {
            google_search: Some(GoogleSearch::default()),
        }
    }
}

/// Harm categories covered by the safety settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HarmCategory {
    #[serde(rename = "HARM_CATEGORY_HARASSMENT")]
    Harassment,
    #[serde(rename = "HARM_CATEGORY_HATE_SPEECH")]
    HateSpeech,
    #[serde(rename = "HARM_CATEGORY_SEXUALLY_EXPLICIT")]
    SexuallyExplicit,
    #[serde(rename = "HARM_CATEGORY_DANGEROUS_CONTENT")]
    DangerousContent,
}

impl HarmCategory {
    pub const ALL: [HarmCategory; 4] = [
        HarmCategory::Harassment,
        HarmCategory::HateSpeech,
        HarmCategory::SexuallyExplicit,
        HarmCategory::DangerousContent,
    ];
}

/// Safety threshold for a single harm category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: String,
}

impl SafetySetting {
    /// The same threshold applied to every harm category
    pub fn uniform(threshold: &str) -> Vec<SafetySetting> {
        HarmCategory::ALL
            .iter()
            .map(|category| SafetySetting {
                category: *category,
                threshold: threshold.to_string(),
            })
            .collect()
    }
}

/// Body of a `:generateContent` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub safety_settings: Vec<SafetySetting>,
}

impl GenerateContentRequest {
    /// Legal research query with search grounding and the legal system instruction
    pub fn grounded_search(query: &str) -> Self {
        Self {
            contents: vec![Content::user(vec![Part::Text(query.to_string())])],
            tools: vec![Tool::google_search()],
            system_instruction: Some(Content::text(LEGAL_SYSTEM_PROMPT)),
            safety_settings: Vec::new(),
        }
    }

    /// Prompt followed by the images as inline data parts, in order
    pub fn prompt_with_images(
        prompt: &str,
        images: &[&ImageAttachment],
        safety_threshold: &str,
    ) -> Self {
        let mut parts = Vec::with_capacity(images.len() + 1);
        parts.push(Part::Text(prompt.to_string()));
        parts.extend(
            images
                .iter()
                .map(|image| Part::InlineData(InlineData::from(*image))),
        );

        Self {
            contents: vec![Content::user(parts)],
            tools: Vec::new(),
            system_instruction: None,
            safety_settings: SafetySetting::uniform(safety_threshold),
        }
    }
}

/// Single prompt instance for `:predict`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictInstance {
    pub prompt: String,
}

/// Generation parameters for `:predict`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictParameters {
    pub sample_count: u32,
}

/// Body of an image generation `:predict` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub instances: Vec<PredictInstance>,
    pub parameters: PredictParameters,
}

impl PredictRequest {
    pub fn for_prompt(prompt: &str) -> Self {
        Self {
            instances: vec![PredictInstance {
                prompt: prompt.to_string(),
            }],
            parameters: PredictParameters {
                sample_count: IMAGE_SAMPLE_COUNT,
            },
        }
    }
}
