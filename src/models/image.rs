//! Image Models
//!
//! The user-selected image, its base64 transport form, and the transient
//! preview handle issued for display.

use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use bytes::Bytes;
use image::ImageFormat;
use uuid::Uuid;

use crate::utils::error::AnalysisError;

/// Media types accepted for analysis.
pub const SUPPORTED_MEDIA_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];

/// Where the image bytes live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Bytes already in memory (e.g. handed over by a file picker).
    Bytes(Bytes),
    /// A file read lazily when the image is encoded.
    File(PathBuf),
}

/// An opaque image blob plus its declared media type.
///
/// Never mutated after construction; clones share the underlying bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResource {
    source: ImageSource,
    media_type: String,
    name: Option<String>,
}

fn media_type_for(format: ImageFormat) -> Option<&'static str> {
    match format {
        ImageFormat::Png => Some("image/png"),
        ImageFormat::Jpeg => Some("image/jpeg"),
        ImageFormat::WebP => Some("image/webp"),
        _ => None,
    }
}

impl ImageResource {
    /// Wrap in-memory bytes with a declared media type. The type is taken as
    /// given and checked against `SUPPORTED_MEDIA_TYPES` when encoded.
    pub fn from_bytes(bytes: impl Into<Bytes>, media_type: impl Into<String>) -> Self {
        Self {
            source: ImageSource::Bytes(bytes.into()),
            media_type: media_type.into(),
            name: None,
        }
    }

    /// Wrap in-memory bytes, detecting the media type from the magic bytes.
    pub fn from_bytes_sniffed(bytes: impl Into<Bytes>) -> Result<Self, AnalysisError> {
        let bytes = bytes.into();
        let media_type = image::guess_format(&bytes)
            .ok()
            .and_then(media_type_for)
            .ok_or_else(|| {
                AnalysisError::Read("unrecognized image format (expected PNG, JPEG or WEBP)".to_string())
            })?;
        Ok(Self::from_bytes(bytes, media_type))
    }

    /// Reference a file on disk, inferring the media type from its extension.
    /// The file is not opened until the image is encoded.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AnalysisError> {
        let path = path.as_ref();
        let media_type = path
            .extension()
            .and_then(ImageFormat::from_extension)
            .and_then(media_type_for)
            .ok_or_else(|| {
                AnalysisError::Read(format!(
                    "unsupported image type: {} (expected PNG, JPEG or WEBP)",
                    path.display()
                ))
            })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());

        Ok(Self {
            source: ImageSource::File(path.to_path_buf()),
            media_type: media_type.to_string(),
            name,
        })
    }

    /// Attach a display name (typically the original file name).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether the declared media type is one the analysis accepts.
    pub fn is_supported(&self) -> bool {
        SUPPORTED_MEDIA_TYPES.contains(&self.media_type.as_str())
    }

    /// Read the full byte content. An empty image is treated as unreadable.
    pub async fn read_bytes(&self) -> Result<Bytes, AnalysisError> {
        let bytes = match &self.source {
            ImageSource::Bytes(bytes) => bytes.clone(),
            ImageSource::File(path) => tokio::fs::read(path)
                .await
                .map(Bytes::from)
                .map_err(|e| AnalysisError::Read(format!("{}: {}", path.display(), e)))?,
        };
        if bytes.is_empty() {
            return Err(AnalysisError::Read("the image is empty".to_string()));
        }
        Ok(bytes)
    }
}

/// Base64 form of an image, paired with its media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    /// Standard base64 with padding, no `data:` prefix.
    pub data: String,
    pub media_type: String,
}

impl EncodedPayload {
    /// Encode raw bytes.
    pub fn from_raw(bytes: &[u8], media_type: impl Into<String>) -> Self {
        Self {
            data: BASE64.encode(bytes),
            media_type: media_type.into(),
        }
    }

    /// Parse a `data:<mime>;base64,<data>` URL, stripping the scheme prefix.
    pub fn from_data_url(url: &str) -> Result<Self, AnalysisError> {
        let malformed = || AnalysisError::Read("malformed data URL".to_string());

        let rest = url.strip_prefix("data:").ok_or_else(malformed)?;
        let (header, data) = rest.split_once(',').ok_or_else(malformed)?;
        let media_type = header.strip_suffix(";base64").ok_or_else(malformed)?;
        if media_type.is_empty() {
            return Err(malformed());
        }

        Ok(Self {
            data: data.to_string(),
            media_type: media_type.to_string(),
        })
    }

    /// Render as a `data:` URL.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }

    /// Decode back to raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>, AnalysisError> {
        BASE64
            .decode(&self.data)
            .map_err(|e| AnalysisError::Read(format!("invalid base64 payload: {}", e)))
    }
}

/// A transient view URL for a selected image.
///
/// Deliberately not `Clone`: the only way to get rid of one is to hand it
/// back to the registry that issued it.
#[derive(Debug, PartialEq, Eq)]
pub struct PreviewHandle {
    id: Uuid,
    url: String,
}

impl PreviewHandle {
    pub fn new(id: Uuid, url: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}
