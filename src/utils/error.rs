//! Error Handling
//!
//! Error types for the application, one enum per concern:
//! - `AppError` for configuration loading and file-level failures
//! - `AnalysisError` for the classified outcome of one analysis attempt
//! - `SessionError` for transitions the session controller refuses
//!
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

use face_analyzer_core::CoreError;
use face_analyzer_llm::LlmError;

use crate::models::session::SessionStatus;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

/// Classified failure of a single analysis attempt.
///
/// The `Display` output is display-ready; the session controller shows it
/// to the user verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// The selected image could not be read or is not a supported image.
    #[error("Could not read the selected image: {0}")]
    Read(String),

    /// No credential or an invalid setting; detected before any request is sent.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Network failure, refused connection, timeout or non-success status.
    #[error("Failed to analyze image. API Error: {0}")]
    Transport(String),

    /// The model replied, but not with the expected JSON object.
    #[error("The model returned an unexpected response: {0}")]
    MalformedResponse(String),
}

impl AnalysisError {
    /// Stable machine-readable name of the failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::Read(_) => "read",
            AnalysisError::Configuration(_) => "configuration",
            AnalysisError::Transport(_) => "transport",
            AnalysisError::MalformedResponse(_) => "malformed_response",
        }
    }
}

impl From<LlmError> for AnalysisError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Configuration { message } => AnalysisError::Configuration(message),
            LlmError::EmptyResponse { message } => AnalysisError::MalformedResponse(message),
            other => AnalysisError::Transport(other.to_string()),
        }
    }
}

impl From<AppError> for AnalysisError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Config(msg) | AppError::Validation(msg) => AnalysisError::Configuration(msg),
            other => AnalysisError::Configuration(other.to_string()),
        }
    }
}

/// Transitions rejected by the session controller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("No image selected")]
    NoImageSelected,

    #[error("An analysis is already in progress")]
    AnalysisInFlight,

    #[error("Cannot start an analysis from the {from} state")]
    InvalidTransition { from: SessionStatus },
}
