//! Core Error Types
//!
//! Foundational error type shared across the Face Analyzer workspace. Kept
//! dependency-free (only thiserror + std) so the core crate stays
//! lightweight. The root crate converts it into `AppError`.

use thiserror::Error;

/// Core error type for the Face Analyzer workspace.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for core errors
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
