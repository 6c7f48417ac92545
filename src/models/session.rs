//! Session Models
//!
//! The lifecycle state of one analysis session as a single tagged enum, plus
//! the serializable snapshot handed to the UI.

use std::fmt;

use serde::Serialize;

use super::analysis::AnalysisResult;
use super::image::{ImageResource, PreviewHandle};
use crate::utils::error::AnalysisError;

/// An image the user selected, together with its live preview handle.
#[derive(Debug)]
pub struct SelectedImage {
    pub resource: ImageResource,
    pub preview: PreviewHandle,
}

/// Lifecycle state. A result and an error can never coexist.
#[derive(Debug, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Selected {
        image: SelectedImage,
    },
    Analyzing {
        image: SelectedImage,
        generation: u64,
    },
    Completed {
        image: SelectedImage,
        result: AnalysisResult,
    },
    Failed {
        image: SelectedImage,
        error: AnalysisError,
    },
}

impl SessionState {
    pub fn status(&self) -> SessionStatus {
        match self {
            SessionState::Idle => SessionStatus::Idle,
            SessionState::Selected { .. } => SessionStatus::Selected,
            SessionState::Analyzing { .. } => SessionStatus::Analyzing,
            SessionState::Completed { .. } => SessionStatus::Completed,
            SessionState::Failed { .. } => SessionStatus::Failed,
        }
    }

    pub fn image(&self) -> Option<&SelectedImage> {
        match self {
            SessionState::Idle => None,
            SessionState::Selected { image }
            | SessionState::Analyzing { image, .. }
            | SessionState::Completed { image, .. }
            | SessionState::Failed { image, .. } => Some(image),
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            SessionState::Completed { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&AnalysisError> {
        match self {
            SessionState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Consume the state, yielding the selected image if any.
    pub fn into_image(self) -> Option<SelectedImage> {
        match self {
            SessionState::Idle => None,
            SessionState::Selected { image }
            | SessionState::Analyzing { image, .. }
            | SessionState::Completed { image, .. }
            | SessionState::Failed { image, .. } => Some(image),
        }
    }
}

/// Fieldless view of `SessionState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Idle,
    Selected,
    Analyzing,
    Completed,
    Failed,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionStatus::Idle => "idle",
            SessionStatus::Selected => "selected",
            SessionStatus::Analyzing => "analyzing",
            SessionStatus::Completed => "completed",
            SessionStatus::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Display-ready failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorView {
    pub kind: String,
    pub message: String,
}

impl From<&AnalysisError> for ErrorView {
    fn from(err: &AnalysisError) -> Self {
        Self {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

/// What the UI needs to render the current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<AnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorView>,
}

impl From<&SessionState> for SessionSnapshot {
    fn from(state: &SessionState) -> Self {
        let image = state.image();
        Self {
            status: state.status(),
            image_name: image.and_then(|i| i.resource.name().map(str::to_string)),
            preview_url: image.map(|i| i.preview.url().to_string()),
            result: state.result().cloned(),
            error: state.error().map(ErrorView::from),
        }
    }
}
