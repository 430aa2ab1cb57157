//! Tests for the HTTP layer: header lowering, response contract, and the
//! two-phase binding type.

use super::*;
use axum::http::HeaderValue;
use axum::response::IntoResponse;
use hook_relay_core::SignatureVerifier;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};

fn state_with_dispatcher(dispatcher: Dispatcher) -> AppState {
    AppState::new(ServiceConfig::default(), Arc::new(dispatcher))
}

fn json_headers(event_type: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("X-GitHub-Event", HeaderValue::from_str(event_type).unwrap());
    headers.insert(
        "X-GitHub-Delivery",
        HeaderValue::from_static("72d3162e-cc78-11e3-81ab-4c9367dc0958"),
    );
    headers.insert("Content-Type", HeaderValue::from_static("application/json"));
    headers
}

#[tokio::test]
async fn test_successful_dispatch_returns_204() {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_in_hook = calls.clone();

    let mut dispatcher = Dispatcher::new();
    dispatcher.register_fn("push", move |_payload: &Value| {
        calls_in_hook.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    let status = handle_postreceive(
        State(state_with_dispatcher(dispatcher)),
        json_headers("push"),
        Bytes::from_static(br#"{"key":"value"}"#),
    )
    .await
    .unwrap();

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_mixed_case_headers_are_lowered_for_dispatch() {
    // GitHub sends X-GitHub-Event; the dispatcher looks up lowercase keys
    let mut dispatcher = Dispatcher::new();
    dispatcher.register_fn("ping", |_payload: &Value| Ok(()));

    let status = handle_postreceive(
        State(state_with_dispatcher(dispatcher)),
        json_headers("ping"),
        Bytes::from_static(br#"{"zen":"Keep it logically awesome."}"#),
    )
    .await
    .unwrap();

    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_zero_matching_handlers_still_returns_204() {
    let dispatcher = Dispatcher::new();

    let status = handle_postreceive(
        State(state_with_dispatcher(dispatcher)),
        json_headers("ping"),
        Bytes::from_static(b"{}"),
    )
    .await
    .unwrap();

    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_signed_request_verifies_over_raw_bytes() {
    let body = br#"{"key":"value"}"#;
    let signature = SignatureVerifier::new(WebhookSecret::from("secret")).sign(body);

    let mut headers = json_headers("push");
    headers.insert("X-Hub-Signature", HeaderValue::from_str(&signature).unwrap());

    let dispatcher = Dispatcher::with_secret(WebhookSecret::from("secret"));

    let status = handle_postreceive(
        State(state_with_dispatcher(dispatcher)),
        headers,
        Bytes::from_static(body),
    )
    .await
    .unwrap();

    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_rejected_request_surfaces_dispatch_error() {
    let dispatcher = Dispatcher::with_secret(WebhookSecret::from("secret"));

    let err = handle_postreceive(
        State(state_with_dispatcher(dispatcher)),
        json_headers("push"),
        Bytes::from_static(b"{}"),
    )
    .await
    .unwrap_err();

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn test_webhook_bind_with_none_preserves_secret() {
    let mut webhook = Webhook::new().with_secret(WebhookSecret::from("secret"));

    webhook.bind(None);

    assert!(webhook.has_secret());
}

#[test]
fn test_webhook_bind_with_some_sets_secret() {
    let mut webhook = Webhook::new();
    assert!(!webhook.has_secret());

    webhook.bind(Some(WebhookSecret::from("late-bound")));

    assert!(webhook.has_secret());
}

#[test]
fn test_webhook_builds_router_with_hooks() {
    // Construction alone must not panic with a custom endpoint and hooks
    let mut webhook = Webhook::new().with_endpoint("/hooks/github");
    webhook.hook_fn("push", |_payload: &Value| Ok(()));

    let _router: Router = webhook.into_router();
}
