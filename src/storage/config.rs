//! JSON Configuration Loading
//!
//! Resolves the effective `AppConfig` from, in increasing precedence:
//! built-in defaults, the optional `~/.face-analyzer/config.json` file, and
//! environment variables. The file is only ever read.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::models::settings::AppConfig;
use crate::utils::error::AppResult;
use crate::utils::paths::config_path;

/// Configuration service holding the resolved settings
#[derive(Debug)]
pub struct ConfigService {
    config_path: Option<PathBuf>,
    config: AppConfig,
}

impl ConfigService {
    /// Load from the default config file (if present) and the process environment
    pub fn load() -> AppResult<Self> {
        let path = config_path()?;
        let file = path.exists().then_some(path);
        Self::load_from(file.as_deref(), |key| std::env::var(key).ok())
    }

    /// Load from an explicit file (or none) and an environment lookup
    pub fn load_from<F>(path: Option<&Path>, env: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => {
                debug!("no config file, starting from defaults");
                AppConfig::default()
            }
        };

        config.apply_env(env)?;
        config.validate()?;

        info!(
            model = %config.model,
            timeout_secs = config.timeout_secs,
            has_api_key = config.has_api_key(),
            proxy = config.proxy.is_some(),
            "configuration loaded"
        );

        Ok(Self {
            config_path: path.map(Path::to_path_buf),
            config,
        })
    }

    /// Load configuration from a file
    fn load_from_file(path: &Path) -> AppResult<AppConfig> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        debug!(path = %path.display(), "config file read");
        Ok(config)
    }

    /// Get the current configuration
    pub fn get_config(&self) -> &AppConfig {
        &self.config
    }

    /// Take ownership of the resolved configuration
    pub fn into_config(self) -> AppConfig {
        self.config
    }

    /// Path of the file the configuration was read from, if any
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}
