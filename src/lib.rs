//! Face Analyzer - Client Library
//!
//! Lets a UI select a photo, have a hosted multimodal model estimate the
//! subject's age and gender, and display the structured result.
//! It includes:
//! - Image encoding (`services::encoder`)
//! - Recovery of the JSON result from free-form model text (`services::recovery`)
//! - The single-request analysis client (`services::analysis_client`)
//! - The session lifecycle controller (`services::session`)
//! - Configuration loading, error types and logging setup

pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export commonly used items
pub use models::analysis::{AnalysisRequest, AnalysisResult, ANALYSIS_INSTRUCTION};
pub use models::image::{EncodedPayload, ImageResource, ImageSource, PreviewHandle};
pub use models::session::{SessionSnapshot, SessionState, SessionStatus};
pub use models::settings::AppConfig;
pub use services::analysis_client::AnalysisClient;
pub use services::preview::{InMemoryPreviewRegistry, PreviewRegistry};
pub use services::session::{AnalysisTicket, Completion, SessionController, SessionHandle};
pub use storage::ConfigService;
pub use utils::error::{AnalysisError, AppError, AppResult, SessionError};
