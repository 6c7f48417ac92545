//! Gemini HTTP Integration Tests
//!
//! Runs the real `GeminiProvider` through `AnalysisClient` against a
//! one-shot HTTP responder on localhost, checking the wire request and the
//! classification of each kind of reply. No external network access.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use face_analyzer::{AnalysisClient, AnalysisError, AppConfig, ImageResource};

// ============================================================================
// Helpers
// ============================================================================

struct CapturedRequest {
    head: String,
    body: serde_json::Value,
}

/// Accept one connection, read the full request, answer with `status` and
/// `body`, and hand back what was received.
async fn serve_once(status: u16, body: String) -> (String, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let task = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        let header_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before headers were complete");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let content_length = head
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);

        while buf.len() < header_end + content_length {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before body was complete");
            buf.extend_from_slice(&chunk[..n]);
        }

        let response = format!(
            "HTTP/1.1 {} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        CapturedRequest {
            head,
            body: serde_json::from_slice(&buf[header_end..header_end + content_length])
                .unwrap(),
        }
    });

    (base_url, task)
}

fn client_for(base_url: &str) -> AnalysisClient {
    let config = AppConfig {
        api_key: Some("test-key".to_string()),
        base_url: Some(base_url.to_string()),
        timeout_secs: 5,
        ..Default::default()
    };
    AnalysisClient::from_config(&config).unwrap()
}

fn gemini_reply(text: &str) -> String {
    serde_json::json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "modelVersion": "gemini-2.5-flash-image"
    })
    .to_string()
}

fn jpeg() -> ImageResource {
    ImageResource::from_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0], "image/jpeg")
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_fenced_reply_over_http() {
    let (base_url, server) = serve_once(
        200,
        gemini_reply("```json\n{\"estimated_gender\": \"male\", \"estimated_age\": 41}\n```"),
    )
    .await;

    let result = client_for(&base_url).analyze(&jpeg()).await.unwrap();
    assert_eq!(result.estimated_gender, "male");
    assert_eq!(result.estimated_age, 41);

    let captured = server.await.unwrap();
    assert!(captured
        .head
        .starts_with("POST /v1beta/models/gemini-2.5-flash-image:generateContent "));
    let head = captured.head.to_ascii_lowercase();
    assert!(head.contains("x-goog-api-key: test-key"));
    assert_eq!(head.matches("content-type:").count(), 1);
    assert!(head.contains("content-type: application/json"));

    let parts = &captured.body["contents"][0]["parts"];
    assert_eq!(parts[0]["inline_data"]["mime_type"], "image/jpeg");
    assert_eq!(parts[0]["inline_data"]["data"], "/9j/4A==");
    assert!(parts[1]["text"]
        .as_str()
        .unwrap()
        .contains("\"estimated_age\" (integer)"));
}

#[tokio::test]
async fn test_error_status_is_transport_error() {
    let (base_url, server) = serve_once(
        500,
        r#"{"error": {"code": 500, "message": "internal"}}"#.to_string(),
    )
    .await;

    let err = client_for(&base_url).analyze(&jpeg()).await.unwrap_err();
    assert!(matches!(err, AnalysisError::Transport(_)));
    assert!(err.to_string().starts_with("Failed to analyze image. API Error:"));
    server.await.unwrap();
}

#[tokio::test]
async fn test_rate_limit_is_transport_error() {
    let (base_url, server) = serve_once(429, r#"{"error": "quota"}"#.to_string()).await;

    let err = client_for(&base_url).analyze(&jpeg()).await.unwrap_err();
    assert!(matches!(err, AnalysisError::Transport(_)));
    assert!(err.to_string().contains("Rate limited"));
    server.await.unwrap();
}

#[tokio::test]
async fn test_prose_reply_is_malformed_response() {
    let (base_url, server) =
        serve_once(200, gemini_reply("Sorry, I can't help with that.")).await;

    let err = client_for(&base_url).analyze(&jpeg()).await.unwrap_err();
    assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    server.await.unwrap();
}

#[tokio::test]
async fn test_blocked_prompt_is_malformed_response() {
    let (base_url, server) = serve_once(
        200,
        r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#.to_string(),
    )
    .await;

    let err = client_for(&base_url).analyze(&jpeg()).await.unwrap_err();
    assert_eq!(err, AnalysisError::MalformedResponse("SAFETY".to_string()));
    server.await.unwrap();
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = client_for(&base_url).analyze(&jpeg()).await.unwrap_err();
    assert!(matches!(err, AnalysisError::Transport(_)));
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    // Accept and hold the connection without ever answering.
    let _server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(10)).await;
        drop(socket);
    });

    let config = AppConfig {
        api_key: Some("test-key".to_string()),
        base_url: Some(base_url),
        timeout_secs: 1,
        ..Default::default()
    };
    let client = AnalysisClient::from_config(&config).unwrap();

    let err = client.analyze(&jpeg()).await.unwrap_err();
    match err {
        AnalysisError::Transport(message) => assert!(message.contains("timed out")),
        other => panic!("expected transport error, got {:?}", other),
    }
}
