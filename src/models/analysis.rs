//! Analysis Models
//!
//! The request sent to the model and the structured result it must return.

use serde::{Deserialize, Serialize};

use face_analyzer_llm::{InferenceRequest, InlineImage};

use super::image::EncodedPayload;

/// Instruction sent alongside every image.
pub const ANALYSIS_INSTRUCTION: &str = "Please analyze the attached image, which contains a \
photograph of a person's face. Your task is to estimate their age and gender. Present your \
findings in a structured JSON format with two keys: \"estimated_gender\" (string) and \
\"estimated_age\" (integer). Please ensure your response adheres strictly to this JSON structure.";

/// Estimated face attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub estimated_gender: String,
    pub estimated_age: u32,
}

/// One image plus the fixed instruction. Built fresh for every attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub payload: EncodedPayload,
    pub instruction: &'static str,
}

impl AnalysisRequest {
    pub fn new(payload: EncodedPayload) -> Self {
        Self {
            payload,
            instruction: ANALYSIS_INSTRUCTION,
        }
    }

    pub fn media_type(&self) -> &str {
        &self.payload.media_type
    }

    /// Convert to the provider-level request.
    pub fn into_inference_request(self) -> InferenceRequest {
        InferenceRequest {
            image: InlineImage {
                media_type: self.payload.media_type,
                data: self.payload.data,
            },
            instruction: self.instruction.to_string(),
        }
    }
}
