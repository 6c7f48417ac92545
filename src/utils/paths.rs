//! Cross-Platform Path Utilities
//!
//! Resolves the application directory (`~/.face-analyzer/`) and the optional
//! config file inside it.

use std::path::PathBuf;

use crate::utils::error::{AppError, AppResult};

/// Name of the per-user application directory
const APP_DIR_NAME: &str = ".face-analyzer";

/// Get the user's home directory
pub fn home_dir() -> AppResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppError::config("Could not determine home directory"))
}

/// Get the application directory (~/.face-analyzer/)
pub fn app_dir() -> AppResult<PathBuf> {
    Ok(home_dir()?.join(APP_DIR_NAME))
}

/// Get the config file path (~/.face-analyzer/config.json)
pub fn config_path() -> AppResult<PathBuf> {
    Ok(app_dir()?.join("config.json"))
}
