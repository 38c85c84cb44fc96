use serde::{Deserialize, Serialize};

use crate::image::ImageAttachment;

/// Structs to map the generateContent JSON payload and response

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

// A part carries either text or inline image data, never both.
#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(
        default,
        rename = "inline_data",
        alias = "inlineData",
        skip_serializing_if = "Option::is_none"
    )]
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
    #[serde(default, alias = "finishReason")]
    pub finish_reason: Option<String>,
}

// Error body shape: {"error": {"code": 429, "message": "...", "status": "RESOURCE_EXHAUSTED"}}
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: Option<u32>,
    pub message: Option<String>,
    pub status: Option<String>,
}

impl GenerateContentRequest {
    /// Single-turn request: the instruction text followed by the image as
    /// inline base64 data.
    pub fn from_prompt_and_image(prompt: &str, image: &ImageAttachment) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part::text(prompt), Part::inline_image(image)],
            }],
        }
    }
}

impl Part {
    pub fn text(text: &str) -> Part {
        Part {
            text: Some(text.to_string()),
            inline_data: None,
        }
    }

    pub fn inline_image(image: &ImageAttachment) -> Part {
        Part {
            text: None,
            inline_data: Some(InlineData {
                mime_type: image.mime().as_str().to_string(),
                data: image.to_base64(),
            }),
        }
    }
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, or `None` when the service
    /// returned no usable text.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;

        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();

        if text.is_empty() { None } else { Some(text) }
    }
}
