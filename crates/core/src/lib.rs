//! Face Analyzer Core
//!
//! Foundational types shared by the Face Analyzer workspace. This crate has
//! no dependency on HTTP clients, async runtimes or the inference provider.
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `proxy` - Proxy configuration data types used by the HTTP client factory

pub mod error;
pub mod proxy;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Proxy Types ────────────────────────────────────────────────────────
pub use proxy::{ProxyConfig, ProxyProtocol};
