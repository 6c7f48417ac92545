//! Image Encoder
//!
//! Turns a selected image into the base64 payload sent inline to the model.

use tracing::debug;

use crate::models::image::{EncodedPayload, ImageResource};
use crate::utils::error::AnalysisError;

/// Read the resource fully and base64-encode it. The media type is passed
/// through unchanged; types outside `SUPPORTED_MEDIA_TYPES` are rejected
/// before the bytes are read.
pub async fn encode(resource: &ImageResource) -> Result<EncodedPayload, AnalysisError> {
    if !resource.is_supported() {
        return Err(AnalysisError::Read(format!(
            "unsupported media type: {} (expected PNG, JPEG or WEBP)",
            resource.media_type()
        )));
    }

    let bytes = resource.read_bytes().await?;
    let payload = EncodedPayload::from_raw(&bytes, resource.media_type());
    debug!(
        media_type = %payload.media_type,
        raw_len = bytes.len(),
        encoded_len = payload.data.len(),
        "image encoded"
    );
    Ok(payload)
}
