//! Shared helpers for the integration tests.

use async_trait::async_trait;
use hook_relay_api::{AppState, ServiceConfig};
use hook_relay_core::registry::{EventHandler, HandlerError};
use hook_relay_core::{Dispatcher, SignatureVerifier, WebhookSecret};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Handler that counts invocations and remembers every payload it saw.
#[derive(Default)]
pub struct RecordingHandler {
    calls: AtomicUsize,
    payloads: Mutex<Vec<Value>>,
}

impl RecordingHandler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    #[allow(dead_code)]
    pub fn payloads(&self) -> Vec<Value> {
        self.payloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventHandler for RecordingHandler {
    async fn handle(&self, payload: &Value) -> Result<(), HandlerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.payloads.lock().unwrap().push(payload.clone());
        Ok(())
    }
}

/// Handler that always fails.
#[allow(dead_code)]
pub struct FailingHandler;

#[async_trait]
impl EventHandler for FailingHandler {
    async fn handle(&self, _payload: &Value) -> Result<(), HandlerError> {
        Err("handler exploded".into())
    }
}

/// Application state around a prepared dispatcher, default config.
pub fn app_state(dispatcher: Dispatcher) -> AppState {
    AppState::new(ServiceConfig::default(), Arc::new(dispatcher))
}

/// Compute the `sha1=<hex>` signature header GitHub would send for this
/// secret and body.
pub fn sign(secret: &str, body: &[u8]) -> String {
    SignatureVerifier::new(WebhookSecret::from(secret)).sign(body)
}
