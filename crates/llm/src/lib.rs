//! Face Analyzer LLM
//!
//! Provides the interface for sending a single image plus instruction to a
//! hosted multimodal model and getting its text reply back:
//! - `InferenceProvider` trait (the seam used by the analysis client and by tests)
//! - Google Gemini `generateContent` provider
//!
//! Also includes the HTTP client factory and HTTP status classification.

pub mod gemini;
pub mod http_client;
pub mod provider;
pub mod types;

// Re-export main types
pub use gemini::GeminiProvider;
pub use http_client::build_http_client;
pub use provider::InferenceProvider;
pub use types::*;
