use reqwest::Response;
use spdlog::prelude::*;
use url::Url;

use crate::api::error::{ApiError, GenerationError};
use crate::api::types::{ErrorResponse, GenerateContentRequest, GenerateContentResponse};
use crate::api::GenerationService;
use crate::image::ImageAttachment;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite";

/// Connection settings for the hosted generation endpoint, passed in
/// explicitly so tests can point the client at a fake server.
///
/// The api key is forwarded as-is; an empty or wrong key is only caught by
/// the service itself when a request goes out.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct GeminiClient {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, GenerationError> {
        // fail early on a base url reqwest could never use
        Url::parse(&config.base_url)?;

        Ok(GeminiClient {
            config,
            client: reqwest::Client::new(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    async fn handle_response(
        &self,
        response: Response,
    ) -> Result<GenerateContentResponse, GenerationError> {
        let status = response.status();
        let message = response.text().await?;

        if status.is_client_error() || status.is_server_error() {
            let detail = serde_json::from_str::<ErrorResponse>(&message)
                .ok()
                .and_then(|body| body.error.message);

            return Err(GenerationError::Api(ApiError::new(status, detail)));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&message)?;

        Ok(parsed)
    }
}

impl GenerationService for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        image: &ImageAttachment,
    ) -> Result<String, GenerationError> {
        let body = GenerateContentRequest::from_prompt_and_image(prompt, image);

        debug!("POST {} ({} prompt bytes)", self.endpoint(), prompt.len());

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let parsed = self.handle_response(response).await?;

        parsed.text().ok_or(GenerationError::EmptyResponse)
    }
}
