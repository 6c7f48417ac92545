//! Gemini Provider
//!
//! Implementation of the InferenceProvider trait for Google's Gemini
//! `generateContent` REST endpoint. Sends one inline image and one text
//! instruction per request and returns the concatenated text parts of the
//! first candidate.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::provider::{missing_api_key_error, parse_http_error, InferenceProvider};
use super::types::{
    InferenceRequest, InferenceResponse, LlmError, LlmResult, ProviderConfig,
};
use crate::http_client::build_http_client;

/// Default Gemini API root
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Gemini provider
pub struct GeminiProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider with the given configuration
    pub fn new(config: ProviderConfig) -> LlmResult<Self> {
        let client = build_http_client(
            config.proxy.as_ref(),
            Duration::from_secs(config.timeout_secs),
        )?;
        Ok(Self { config, client })
    }

    /// Get the API base URL
    fn base_url(&self) -> &str {
        self.config.base_url.as_deref().unwrap_or(GEMINI_API_BASE)
    }

    /// Full `generateContent` URL for the configured model
    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url().trim_end_matches('/'),
            self.config.model
        )
    }

    /// Build the request body for the API. The image part precedes the text
    /// part, matching how the model is prompted in the web client.
    fn build_request_body(&self, request: &InferenceRequest) -> serde_json::Value {
        serde_json::json!({
            "contents": [{
                "parts": [
                    {
                        "inline_data": {
                            "mime_type": request.image.media_type,
                            "data": request.image.data,
                        }
                    },
                    { "text": request.instruction }
                ]
            }]
        })
    }

    /// Parse a response from the Gemini API
    fn parse_response(&self, response: GeminiResponse) -> LlmResult<InferenceResponse> {
        let model = response
            .model_version
            .unwrap_or_else(|| self.config.model.clone());

        let Some(candidate) = response.candidates.into_iter().next() else {
            let reason = response
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .unwrap_or_else(|| "no candidates returned".to_string());
            return Err(LlmError::EmptyResponse { message: reason });
        };

        let text: String = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(LlmError::EmptyResponse {
                message: format!(
                    "candidate contained no text (finish_reason: {})",
                    candidate.finish_reason.as_deref().unwrap_or("unknown")
                ),
            });
        }

        Ok(InferenceResponse {
            text,
            model,
            finish_reason: candidate.finish_reason,
        })
    }
}

#[async_trait]
impl InferenceProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn generate(&self, request: &InferenceRequest) -> LlmResult<InferenceResponse> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| missing_api_key_error("gemini"))?;

        let body = self.build_request_body(request);
        debug!(
            model = %self.config.model,
            media_type = %request.image.media_type,
            payload_len = request.image.data.len(),
            "gemini: sending generateContent request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::from_reqwest(&e))?;

        let status = response.status().as_u16();
        let body_text = response
            .text()
            .await
            .map_err(|e| LlmError::from_reqwest(&e))?;

        if !(200..300).contains(&status) {
            warn!(status, "gemini: request failed");
            return Err(parse_http_error(status, &body_text, "gemini"));
        }

        let gemini_response: GeminiResponse =
            serde_json::from_str(&body_text).map_err(|e| LlmError::ParseError {
                message: format!("Failed to parse response: {}", e),
            })?;

        self.parse_response(gemini_response)
    }
}

/// Gemini API response format
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}
