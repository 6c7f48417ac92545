//! Settings Models
//!
//! Application configuration and the environment variables that override it.

use serde::{Deserialize, Serialize};

use face_analyzer_core::proxy::ProxyConfig;
use face_analyzer_llm::{ProviderConfig, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};

use crate::utils::error::{AppError, AppResult};

/// Primary credential variable
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
/// Fallback credential variable, as injected by hosted build environments
pub const ENV_API_KEY: &str = "API_KEY";
pub const ENV_MODEL: &str = "FACE_ANALYZER_MODEL";
pub const ENV_BASE_URL: &str = "FACE_ANALYZER_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "FACE_ANALYZER_TIMEOUT_SECS";

/// Application configuration stored in config.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Inference API credential. Read from the file or the environment,
    /// never written out.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Model used for analysis
    pub model: String,
    /// Override for the inference API root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Optional outbound proxy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxyConfig>,
}

impl Default for AppConfig {
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

impl AppConfig {
    /// Overlay values from environment variables. `lookup` is usually
    /// `|k| std::env::var(k).ok()`; tests pass a map.
    pub fn apply_env<F>(&mut self, lookup: F) -> AppResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty(ENV_GEMINI_API_KEY).or_else(|| non_empty(ENV_API_KEY)) {
            self.api_key = Some(key);
        }
        if let Some(model) = non_empty(ENV_MODEL) {
            self.model = model;
        }
        if let Some(base_url) = non_empty(ENV_BASE_URL) {
            self.base_url = Some(base_url);
        }
        if let Some(timeout) = non_empty(ENV_TIMEOUT_SECS) {
            self.timeout_secs = timeout.trim().parse().map_err(|_| {
                AppError::config(format!("{} must be a whole number of seconds", ENV_TIMEOUT_SECS))
            })?;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> AppResult<()> {
        if self.model.trim().is_empty() {
            return Err(AppError::validation("model must not be empty"));
        }

        if self.timeout_secs == 0 {
            return Err(AppError::validation("timeout_secs must be at least 1 second"));
        }

        if let Some(base_url) = &self.base_url {
            let parsed = url::Url::parse(base_url).map_err(|e| {
                AppError::validation(format!("Invalid base_url {}: {}", base_url, e))
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(AppError::validation(format!(
                    "base_url must use http or https: {}",
                    base_url
                )));
            }
        }

        if let Some(proxy) = &self.proxy {
            proxy.validate()?;
        }

        Ok(())
    }

    /// Whether a non-empty credential is available
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Build the provider configuration, failing if the credential is missing.
    pub fn provider_config(&self) -> AppResult<ProviderConfig> {
        self.validate()?;
        if !self.has_api_key() {
            return Err(AppError::config(format!(
                "API key is not set. Provide it via {} or {}",
                ENV_GEMINI_API_KEY, ENV_API_KEY
            )));
        }

        Ok(ProviderConfig {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            proxy: self.proxy.clone(),
        })
    }
}
