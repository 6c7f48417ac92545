//! Storage Layer
//!
//! Read-only JSON configuration. Images and results are never persisted.

pub mod config;

pub use config::*;
