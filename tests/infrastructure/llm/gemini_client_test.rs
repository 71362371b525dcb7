use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use serde_json::{Value, json};

use quizzybee::application::ports::{LlmClient, LlmClientError};
use quizzybee::infrastructure::llm::GeminiClient;

use super::stub_server;

fn client(base_url: &str, timeout: Duration) -> GeminiClient {
    GeminiClient::new(
        Some(base_url),
        "test-key".to_string(),
        "gemini-1.5-pro".to_string(),
        256,
        0.7,
        timeout,
    )
    .unwrap()
}

#[tokio::test]
async fn given_candidate_text_when_generating_then_parts_concatenated() {
    let router = Router::new().route(
        "/models/gemini-1.5-pro:generateContent",
        post(|headers: HeaderMap, Json(body): Json<Value>| async move {
            assert_eq!(headers.get("x-goog-api-key").unwrap(), "test-key");
            assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
            assert_eq!(body["generationConfig"]["maxOutputTokens"], 256);
            Json(json!({
                "candidates": [{
                    "content": { "role": "model", "parts": [{ "text": "## Note 1\n" }, { "text": "Body" }] }
                }]
            }))
        }),
    );
    let base = stub_server::spawn(router).await;

    let text = client(&base, Duration::from_secs(5))
        .generate("hello")
        .await
        .unwrap();

    assert_eq!(text, "## Note 1\nBody");
}

#[tokio::test]
async fn given_blocked_prompt_when_generating_then_invalid_request() {
    let router = Router::new().route(
        "/models/gemini-1.5-pro:generateContent",
        post(|| async { Json(json!({ "promptFeedback": { "blockReason": "SAFETY" } })) }),
    );
    let base = stub_server::spawn(router).await;

    let err = client(&base, Duration::from_secs(5))
        .generate("hello")
        .await
        .unwrap_err();

    assert!(matches!(err, LlmClientError::InvalidRequest(ref m) if m.contains("SAFETY")));
}

#[tokio::test]
async fn given_no_candidates_when_generating_then_empty_response() {
    let router = Router::new().route(
        "/models/gemini-1.5-pro:generateContent",
        post(|| async { Json(json!({ "candidates": [] })) }),
    );
    let base = stub_server::spawn(router).await;

    let err = client(&base, Duration::from_secs(5))
        .generate("hello")
        .await
        .unwrap_err();

    assert_eq!(err, LlmClientError::EmptyResponse);
}

#[tokio::test]
async fn given_rejected_key_when_generating_then_unauthorized() {
    let router = Router::new().route(
        "/models/gemini-1.5-pro:generateContent",
        post(|| async { (StatusCode::FORBIDDEN, "API key not valid") }),
    );
    let base = stub_server::spawn(router).await;

    let err = client(&base, Duration::from_secs(5))
        .generate("hello")
        .await
        .unwrap_err();

    assert!(matches!(err, LlmClientError::Unauthorized(_)));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn given_overloaded_service_when_generating_then_retryable_server_error() {
    let router = Router::new().route(
        "/models/gemini-1.5-pro:generateContent",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "overloaded") }),
    );
    let base = stub_server::spawn(router).await;

    let err = client(&base, Duration::from_secs(5))
        .generate("hello")
        .await
        .unwrap_err();

    assert!(matches!(err, LlmClientError::ServerError(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn given_slow_service_when_generating_then_timeout() {
    let router = Router::new().route(
        "/models/gemini-1.5-pro:generateContent",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({}))
        }),
    );
    let base = stub_server::spawn(router).await;

    let err = client(&base, Duration::from_millis(200))
        .generate("hello")
        .await
        .unwrap_err();

    assert!(matches!(err, LlmClientError::Timeout(_)));
}

#[tokio::test]
async fn given_unreachable_host_when_generating_then_network_error() {
    let err = client("http://127.0.0.1:1", Duration::from_secs(2))
        .generate("hello")
        .await
        .unwrap_err();

    assert!(matches!(err, LlmClientError::Network(_)));
}
