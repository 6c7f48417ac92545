//! Result Recovery
//!
//! Pulls the JSON object out of the model's free-form reply. Models often
//! wrap JSON in a markdown fence labelled `json`; this module strips exactly
//! that and nothing more. It is not a markdown parser: nested fences are not
//! handled, and more than one `json` fence is rejected rather than guessed at.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::models::analysis::AnalysisResult;
use crate::utils::error::AnalysisError;

// Opening marker tagged json, optional newline, lazily captured body, optional newline, closing marker.
static JSON_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```json\n?([\s\S]*?)\n?```").expect("JSON fence pattern is valid")
});

/// Return the JSON text to parse: the trimmed interior of the single `json`
/// fence if there is one, otherwise the whole input trimmed.
pub fn extract_payload(raw: &str) -> Result<&str, AnalysisError> {
    let mut fences = JSON_FENCE.captures_iter(raw);
    let Some(first) = fences.next() else {
        return Ok(raw.trim());
    };
    if fences.next().is_some() {
        return Err(AnalysisError::MalformedResponse(
            "response contains more than one fenced json block".to_string(),
        ));
    }

    debug!("stripped json fence from model response");
    Ok(first.get(1).map_or("", |m| m.as_str()).trim())
}

/// Parse the model's reply into an `AnalysisResult`.
pub fn recover(raw: &str) -> Result<AnalysisResult, AnalysisError> {
    let payload = extract_payload(raw)?;
    serde_json::from_str(payload).map_err(|e| {
        debug!(
            error = %e,
            preview = %payload.chars().take(80).collect::<String>(),
            "model response is not the expected JSON"
        );
        AnalysisError::MalformedResponse(e.to_string())
    })
}
