//! Integration Tests Module
//!
//! End-to-end tests for Face Analyzer: the session lifecycle driven through
//! `SessionHandle`, and the Gemini provider exercised over real HTTP against
//! a local responder.

// Session lifecycle and stale-completion tests
mod session_lifecycle_test;

// Gemini wire format and failure classification tests
mod gemini_http_test;
