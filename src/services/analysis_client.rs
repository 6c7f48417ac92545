//! Analysis Client
//!
//! One analysis = encode the image, send it with the fixed instruction to the
//! inference provider, recover the JSON result from the reply. Exactly one
//! provider call per attempt and no retries; a failed attempt is final.

use std::sync::Arc;

use tracing::{info, warn};

use face_analyzer_llm::{GeminiProvider, InferenceProvider};

use super::{encoder, recovery};
use crate::models::analysis::{AnalysisRequest, AnalysisResult};
use crate::models::image::ImageResource;
use crate::models::settings::AppConfig;
use crate::utils::error::AnalysisError;

/// Client that turns an image into an `AnalysisResult`.
pub struct AnalysisClient {
    provider: Arc<dyn InferenceProvider>,
}

impl AnalysisClient {
    /// Wrap an existing provider.
    pub fn new(provider: Arc<dyn InferenceProvider>) -> Self {
        Self { provider }
    }

    /// Build a Gemini-backed client. Fails immediately with
    /// `AnalysisError::Configuration` when no API key is configured, instead
    /// of letting the first request fail at the transport layer.
    pub fn from_config(config: &AppConfig) -> Result<Self, AnalysisError> {
        let provider_config = config.provider_config().map_err(|e| {
            warn!(error = %e, "analysis client not configured");
            AnalysisError::from(e)
        })?;
        let provider = GeminiProvider::new(provider_config)?;
        info!(
            provider = provider.name(),
            model = provider.model(),
            "analysis client ready"
        );
        Ok(Self::new(Arc::new(provider)))
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// Analyze one image.
    pub async fn analyze(&self, resource: &ImageResource) -> Result<AnalysisResult, AnalysisError> {
        let payload = encoder::encode(resource).await?;
        let request = AnalysisRequest::new(payload);

        let response = self
            .provider
            .generate(&request.into_inference_request())
            .await
            .map_err(|e| {
                warn!(provider = self.provider.name(), error = %e, "inference request failed");
                AnalysisError::from(e)
            })?;

        let result = recovery::recover(&response.text)?;
        info!(
            model = %response.model,
            estimated_age = result.estimated_age,
            "analysis completed"
        );
        Ok(result)
    }
}
