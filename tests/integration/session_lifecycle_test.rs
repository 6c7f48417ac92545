//! Session Lifecycle Integration Tests
//!
//! Drives `SessionHandle` the way a UI event loop would: selection, analysis
//! in a spawned task, and resets/selections racing the in-flight request.
//! The provider is a gated mock, so every interleaving is deterministic.
//! No network calls are made.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{oneshot, Notify};

use face_analyzer::{
    AnalysisClient, Completion, ImageResource, InMemoryPreviewRegistry, SessionController,
    SessionError, SessionHandle, SessionStatus,
};
use face_analyzer_llm::{InferenceProvider, InferenceRequest, InferenceResponse, LlmError, LlmResult};

// ============================================================================
// Helpers
// ============================================================================

/// Provider that blocks each request until the test opens its gate.
struct GatedProvider {
    reply: LlmResult<String>,
    calls: AtomicUsize,
    started: Notify,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
}

impl GatedProvider {
    fn new(reply: LlmResult<String>) -> (Arc<Self>, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        let provider = Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
            started: Notify::new(),
            gate: Mutex::new(Some(rx)),
        });
        (provider, tx)
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InferenceProvider for GatedProvider {
    fn name(&self) -> &'static str {
        "gated"
    }

    fn model(&self) -> &str {
        "gated-model"
    }

    async fn generate(&self, _request: &InferenceRequest) -> LlmResult<InferenceResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gate.lock().unwrap().take();
        self.started.notify_one();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.reply.clone().map(|text| InferenceResponse {
            text,
            model: "gated-model".to_string(),
            finish_reason: Some("STOP".to_string()),
        })
    }
}

fn female_29() -> LlmResult<String> {
    Ok("```json\n{\"estimated_gender\":\"female\",\"estimated_age\":29}\n```".to_string())
}

fn image(name: &str) -> ImageResource {
    ImageResource::from_bytes(vec![0x89, b'P', b'N', b'G'], "image/png").with_name(name)
}

fn session(
    provider: Arc<GatedProvider>,
) -> (SessionHandle, Arc<InMemoryPreviewRegistry>) {
    let previews = Arc::new(InMemoryPreviewRegistry::new());
    let client = Arc::new(AnalysisClient::new(provider));
    let controller = SessionController::with_previews(client, previews.clone());
    (SessionHandle::new(controller), previews)
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_full_cycle_select_analyze_reset() {
    let (provider, gate) = GatedProvider::new(female_29());
    let (handle, previews) = session(provider.clone());

    handle.select(image("a.png")).await;
    assert_eq!(handle.status().await, SessionStatus::Selected);

    let task = tokio::spawn({
        let handle = handle.clone();
        async move { handle.analyze().await }
    });
    provider.started.notified().await;
    assert_eq!(handle.status().await, SessionStatus::Analyzing);

    gate.send(()).unwrap();
    assert_eq!(task.await.unwrap().unwrap(), Completion::Applied);

    let snapshot = handle.snapshot().await;
    assert_eq!(snapshot.status, SessionStatus::Completed);
    let result = snapshot.result.unwrap();
    assert_eq!(result.estimated_gender, "female");
    assert_eq!(result.estimated_age, 29);
    assert!(snapshot.error.is_none());

    handle.reset().await;
    let snapshot = handle.snapshot().await;
    assert_eq!(snapshot.status, SessionStatus::Idle);
    assert!(snapshot.preview_url.is_none());
    assert!(snapshot.result.is_none());
    assert_eq!(previews.live_count(), 0);
}

#[tokio::test]
async fn test_second_analyze_rejected_while_in_flight() {
    let (provider, gate) = GatedProvider::new(female_29());
    let (handle, _) = session(provider.clone());
    handle.select(image("a.png")).await;

    let task = tokio::spawn({
        let handle = handle.clone();
        async move { handle.analyze().await }
    });
    provider.started.notified().await;

    assert_eq!(
        handle.analyze().await.unwrap_err(),
        SessionError::AnalysisInFlight
    );
    assert_eq!(provider.calls(), 1);

    gate.send(()).unwrap();
    assert_eq!(task.await.unwrap().unwrap(), Completion::Applied);
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_reset_mid_flight_ignores_late_success() {
    let (provider, gate) = GatedProvider::new(female_29());
    let (handle, previews) = session(provider.clone());
    handle.select(image("a.png")).await;

    let task = tokio::spawn({
        let handle = handle.clone();
        async move { handle.analyze().await }
    });
    provider.started.notified().await;

    handle.reset().await;
    assert_eq!(previews.live_count(), 0);

    gate.send(()).unwrap();
    assert_eq!(task.await.unwrap().unwrap(), Completion::Discarded);

    let snapshot = handle.snapshot().await;
    assert_eq!(snapshot.status, SessionStatus::Idle);
    assert!(snapshot.result.is_none());
}

#[tokio::test]
async fn test_new_selection_mid_flight_drops_late_error() {
    let (provider, gate) = GatedProvider::new(Err(LlmError::Timeout {
        message: "operation timed out".to_string(),
    }));
    let (handle, previews) = session(provider.clone());
    handle.select(image("a.png")).await;

    let task = tokio::spawn({
        let handle = handle.clone();
        async move { handle.analyze().await }
    });
    provider.started.notified().await;

    handle.select(image("b.png")).await;
    gate.send(()).unwrap();
    assert_eq!(task.await.unwrap().unwrap(), Completion::Discarded);

    let snapshot = handle.snapshot().await;
    assert_eq!(snapshot.status, SessionStatus::Selected);
    assert_eq!(snapshot.image_name.as_deref(), Some("b.png"));
    assert!(snapshot.error.is_none());
    assert_eq!(previews.live_count(), 1);
}

#[tokio::test]
async fn test_failure_then_new_image_starts_over() {
    let (provider, gate) = GatedProvider::new(Ok("not json at all".to_string()));
    let (handle, previews) = session(provider.clone());
    handle.select(image("a.png")).await;

    gate.send(()).unwrap();
    assert_eq!(handle.analyze().await.unwrap(), Completion::Applied);

    let snapshot = handle.snapshot().await;
    assert_eq!(snapshot.status, SessionStatus::Failed);
    assert_eq!(snapshot.error.unwrap().kind, "malformed_response");

    handle.select(image("b.png")).await;
    let snapshot = handle.snapshot().await;
    assert_eq!(snapshot.status, SessionStatus::Selected);
    assert!(snapshot.error.is_none());
    assert_eq!(previews.live_count(), 1);
}

#[tokio::test]
async fn test_unreadable_image_fails_without_network_call() {
    let (provider, _gate) = GatedProvider::new(female_29());
    let (handle, _) = session(provider.clone());
    handle
        .select(ImageResource::from_path("/no/such/face.jpg").unwrap())
        .await;

    assert_eq!(handle.analyze().await.unwrap(), Completion::Applied);
    let snapshot = handle.snapshot().await;
    assert_eq!(snapshot.status, SessionStatus::Failed);
    let error = snapshot.error.unwrap();
    assert_eq!(error.kind, "read");
    assert!(error.message.starts_with("Could not read the selected image"));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_unsupported_media_type_fails_without_network_call() {
    let (provider, _gate) = GatedProvider::new(female_29());
    let (handle, previews) = session(provider.clone());
    handle
        .select(ImageResource::from_bytes(b"GIF89a".to_vec(), "image/gif").with_name("anim.gif"))
        .await;

    assert_eq!(handle.analyze().await.unwrap(), Completion::Applied);
    let snapshot = handle.snapshot().await;
    assert_eq!(snapshot.status, SessionStatus::Failed);
    assert_eq!(snapshot.error.unwrap().kind, "read");
    assert!(snapshot.result.is_none());
    assert_eq!(provider.calls(), 0);
    assert_eq!(previews.live_count(), 1);
}
