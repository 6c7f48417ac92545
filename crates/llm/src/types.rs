//! Inference Types
//!
//! Request, response, configuration and error types shared by every
//! inference provider.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use face_analyzer_core::proxy::ProxyConfig;

/// Default model used for face attribute estimation.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Provider configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderConfig {
    /// Credential for the hosted API. Never serialized.
    #[serde(skip_serializing, default)]
    pub api_key: Option<String>,
    pub model: String,
    /// Override for the API root (e.g. a regional endpoint or a test server).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxyConfig>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            proxy: None,
        }
    }
}

/// Base64 image data sent inline with the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub media_type: String,
    /// Standard base64, no `data:` prefix.
    pub data: String,
}

/// A single-turn multimodal request: one image and one instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceRequest {
    pub image: InlineImage,
    pub instruction: String,
}

/// The model's textual reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceResponse {
    pub text: String,
    pub model: String,
    pub finish_reason: Option<String>,
}

/// Errors raised by inference providers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Rate limited: {message}")]
    RateLimited { message: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Model not found: {model}")]
    ModelNotFound { model: String },

    #[error("Server error: {message}")]
    ServerError { message: String, status: Option<u16> },

    #[error("Network error: {message}")]
    NetworkError { message: String },

    #[error("Request timed out: {message}")]
    Timeout { message: String },

    #[error("Failed to parse response: {message}")]
    ParseError { message: String },

    /// The API answered successfully but carried no text (e.g. a blocked prompt).
    #[error("Empty response: {message}")]
    EmptyResponse { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("{message}")]
    Other { message: String },
}

impl LlmError {
    /// Classify a reqwest failure, keeping timeouts distinct from other network errors.
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout {
                message: err.to_string(),
            }
        } else {
            LlmError::NetworkError {
                message: err.to_string(),
            }
        }
    }
}

/// Result type alias for provider operations
pub type LlmResult<T> = Result<T, LlmError>;
