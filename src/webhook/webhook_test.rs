use axum::http::StatusCode;
use serde_json::json;

use super::test_helpers::spawn_endpoint;
use super::*;

fn client() -> WebhookClient {
    WebhookClient::new(WebhookTimeouts { request_secs: 5, connect_secs: 2 }).unwrap()
}

// =============================================================================
// Dispatch
// =============================================================================

#[tokio::test]
async fn json_payload_is_posted_with_json_content_type() {
    let (url, captured) = spawn_endpoint(StatusCode::NO_CONTENT, "").await;
    let payload = WebhookPayload::Json(json!({ "content": "new leave request" }));

    client().send(&url, &payload).await.unwrap();

    let requests = captured.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, "application/json");
    let body: serde_json::Value = serde_json::from_slice(&requests[0].1).unwrap();
    assert_eq!(body, json!({ "content": "new leave request" }));
}

#[tokio::test]
async fn server_error_carries_status_and_body() {
    let (url, _) = spawn_endpoint(StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").await;

    let err = client()
        .send(&url, &WebhookPayload::Json(json!({})))
        .await
        .unwrap_err();

    assert!(matches!(&err, WebhookError::Status { status: 500, body } if body == "upstream exploded"));
    let message = err.to_string();
    assert!(message.contains("500"), "{message}");
    assert!(message.contains("upstream exploded"), "{message}");
    assert!(err.retryable());
    assert_eq!(err.error_code(), "E_WEBHOOK_STATUS");
}

#[tokio::test]
async fn client_error_is_not_retryable() {
    let (url, _) = spawn_endpoint(StatusCode::BAD_REQUEST, "{\"message\": \"Cannot send an empty message\"}").await;
    let err = client()
        .send(&url, &WebhookPayload::Json(json!({})))
        .await
        .unwrap_err();
    assert!(matches!(err, WebhookError::Status { status: 400, .. }));
    assert!(!err.retryable());
}

#[tokio::test]
async fn multipart_payload_is_posted_as_form() {
    let (url, captured) = spawn_endpoint(StatusCode::OK, "{}").await;
    let form = MultipartForm::new()
        .text("payload_json", "{\"content\":\"delivery\"}")
        .file(FilePart {
            name: "files[0]".to_owned(),
            filename: "receipt.txt".to_owned(),
            content_type: "text/plain".to_owned(),
            bytes: b"10 boxes".to_vec(),
        });

    client().send(&url, &WebhookPayload::Multipart(form)).await.unwrap();

    let requests = captured.lock().unwrap();
    assert!(requests[0].0.starts_with("multipart/form-data; boundary="), "{}", requests[0].0);
    let body = String::from_utf8_lossy(&requests[0].1);
    assert!(body.contains("name=\"payload_json\""));
    assert!(body.contains("filename=\"receipt.txt\""));
    assert!(body.contains("10 boxes"));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_request_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client()
        .send(&format!("http://{addr}/hook"), &WebhookPayload::Json(json!({})))
        .await
        .unwrap_err();
    assert!(matches!(err, WebhookError::Request(_)), "{err}");
    assert!(err.retryable());
}

#[tokio::test]
async fn invalid_mime_type_is_rejected_before_sending() {
    let (url, captured) = spawn_endpoint(StatusCode::OK, "").await;
    let form = MultipartForm::new().file(FilePart {
        name: "file".to_owned(),
        filename: "x".to_owned(),
        content_type: "not a mime".to_owned(),
        bytes: Vec::new(),
    });
    let err = client().send(&url, &form.into()).await.unwrap_err();
    assert!(matches!(err, WebhookError::InvalidPayload(_)));
    assert!(captured.lock().unwrap().is_empty());
}

// =============================================================================
// Helpers
// =============================================================================

#[test]
fn redact_url_keeps_only_origin() {
    assert_eq!(
        redact_url("https://discord.com/api/webhooks/123/secret-token"),
        "https://discord.com/…"
    );
    assert_eq!(redact_url("http://127.0.0.1:9/hook?x=1"), "http://127.0.0.1:9/…");
    assert_eq!(redact_url("not a url"), "<invalid url>");
}

#[test]
fn not_configured_names_the_channel() {
    let err = WebhookError::NotConfigured(WebhookChannel::Delivery);
    assert_eq!(err.to_string(), "no webhook URL configured for delivery notifications");
    assert_eq!(err.error_code(), "E_WEBHOOK_NOT_CONFIGURED");
    assert!(!err.retryable());
}
