//! Session Controller
//!
//! Drives the user-visible lifecycle:
//!
//! ```text
//! Idle --select--> Selected --analyze--> Analyzing --ok--> Completed
//!                     ^  |                   |  \--err--> Failed
//!                     |  +--select-----------+
//!   any --reset--> Idle;  Completed|Failed --select--> Selected
//!   Failed --analyze--> Analyzing (retry on the same image)
//! ```
//!
//! Every `select`, `reset` and `begin_analysis` bumps a generation counter.
//! A completion is applied only if the controller is still `Analyzing` under
//! the generation the request was started with; anything else is stale and
//! dropped.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use super::analysis_client::AnalysisClient;
use super::preview::{InMemoryPreviewRegistry, PreviewRegistry};
use crate::models::analysis::AnalysisResult;
use crate::models::image::ImageResource;
use crate::models::session::{SelectedImage, SessionSnapshot, SessionState, SessionStatus};
use crate::utils::error::{AnalysisError, SessionError};

/// Issued by `begin_analysis`; identifies the request when it completes.
#[derive(Debug, Clone)]
pub struct AnalysisTicket {
    generation: u64,
    image: ImageResource,
}

impl AnalysisTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn image(&self) -> &ImageResource {
        &self.image
    }
}

/// What happened to a completion handed to `complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The outcome became the new state.
    Applied,
    /// The request was superseded by a later select or reset.
    Discarded,
}

/// Finite-state controller for one analysis session.
pub struct SessionController {
    state: SessionState,
    generation: u64,
    client: Arc<AnalysisClient>,
    previews: Arc<dyn PreviewRegistry>,
}

impl SessionController {
    /// Create a controller with an in-memory preview registry.
    pub fn new(client: Arc<AnalysisClient>) -> Self {
        Self::with_previews(client, Arc::new(InMemoryPreviewRegistry::new()))
    }

    /// Create a controller whose preview handles come from the UI host.
    pub fn with_previews(client: Arc<AnalysisClient>, previews: Arc<dyn PreviewRegistry>) -> Self {
        Self {
            state: SessionState::Idle,
            generation: 0,
            client,
            previews,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn status(&self) -> SessionStatus {
        self.state.status()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn client(&self) -> Arc<AnalysisClient> {
        Arc::clone(&self.client)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::from(&self.state)
    }

    /// Choose a new image from any state. Clears any result or error,
    /// releases the previous preview, and supersedes an in-flight request.
    pub fn select(&mut self, image: ImageResource) {
        let from = self.status();
        self.release_current();
        self.generation += 1;

        let preview = self.previews.create(&image);
        debug!(
            from = %from,
            generation = self.generation,
            media_type = image.media_type(),
            "session: image selected"
        );
        self.state = SessionState::Selected {
            image: SelectedImage {
                resource: image,
                preview,
            },
        };
    }

    /// Move `Selected -> Analyzing` (or retry from `Failed`, dropping the
    /// error) and hand out the ticket for the request.
    pub fn begin_analysis(&mut self) -> Result<AnalysisTicket, SessionError> {
        match std::mem::take(&mut self.state) {
            SessionState::Selected { image } | SessionState::Failed { image, .. } => {
                self.generation += 1;
                let ticket = AnalysisTicket {
                    generation: self.generation,
                    image: image.resource.clone(),
                };
                self.state = SessionState::Analyzing {
                    image,
                    generation: self.generation,
                };
                debug!(generation = self.generation, "session: analysis started");
                Ok(ticket)
            }
            other => {
                let err = match other.status() {
                    SessionStatus::Idle => SessionError::NoImageSelected,
                    SessionStatus::Analyzing => SessionError::AnalysisInFlight,
                    from => SessionError::InvalidTransition { from },
                };
                self.state = other;
                debug!(error = %err, "session: analyze rejected");
                Err(err)
            }
        }
    }

    /// Deliver the outcome of the request started under `generation`.
    pub fn complete(
        &mut self,
        generation: u64,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> Completion {
        match std::mem::take(&mut self.state) {
            SessionState::Analyzing {
                image,
                generation: current,
            } if current == generation => {
                self.state = match outcome {
                    Ok(result) => {
                        info!(generation, "session: analysis completed");
                        SessionState::Completed { image, result }
                    }
                    Err(error) => {
                        info!(generation, kind = error.kind(), "session: analysis failed");
                        SessionState::Failed { image, error }
                    }
                };
                Completion::Applied
            }
            other => {
                self.state = other;
                debug!(
                    generation,
                    current = self.generation,
                    ok = outcome.is_ok(),
                    "session: discarding stale completion"
                );
                Completion::Discarded
            }
        }
    }

    /// Return to `Idle` from any state, releasing the preview. An in-flight
    /// request keeps running but its completion will be discarded.
    pub fn reset(&mut self) {
        let from = self.status();
        self.release_current();
        self.generation += 1;
        debug!(from = %from, generation = self.generation, "session: reset");
    }

    /// Run one analysis to completion. The controller is borrowed for the
    /// whole request; use `SessionHandle` when a reset must be able to
    /// interleave.
    pub async fn analyze(&mut self) -> Result<Completion, SessionError> {
        let ticket = self.begin_analysis()?;
        let outcome = self.client.analyze(ticket.image()).await;
        Ok(self.complete(ticket.generation(), outcome))
    }

    fn release_current(&mut self) {
        if let Some(image) = std::mem::take(&mut self.state).into_image() {
            self.previews.release(image.preview);
        }
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.release_current();
    }
}

/// Shareable handle around a controller, for hosts where UI events and the
/// network completion arrive as separate tasks.
#[derive(Clone)]
pub struct SessionHandle {
    inner: Arc<Mutex<SessionController>>,
}

impl SessionHandle {
    pub fn new(controller: SessionController) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controller)),
        }
    }

    pub async fn select(&self, image: ImageResource) {
        self.inner.lock().await.select(image);
    }

    pub async fn reset(&self) {
        self.inner.lock().await.reset();
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.inner.lock().await.snapshot()
    }

    pub async fn status(&self) -> SessionStatus {
        self.inner.lock().await.status()
    }

    /// Direct access to the controller.
    pub async fn lock(&self) -> MutexGuard<'_, SessionController> {
        self.inner.lock().await
    }

    /// Start an analysis and wait for it. The lock is released while the
    /// request is in flight, so `select`/`reset` from other tasks proceed
    /// and turn this completion into `Completion::Discarded`.
    pub async fn analyze(&self) -> Result<Completion, SessionError> {
        let (ticket, client) = {
            let mut controller = self.inner.lock().await;
            (controller.begin_analysis()?, controller.client())
        };

        let outcome = client.analyze(ticket.image()).await;

        let mut controller = self.inner.lock().await;
        Ok(controller.complete(ticket.generation(), outcome))
    }
}
