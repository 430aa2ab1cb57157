//! Per-request dispatch orchestration.
//!
//! A [`Dispatcher`] owns the handler registry and the optional signature
//! verifier, and runs the fixed per-request sequence: authenticate, require
//! the event-type header, decode the payload, then invoke the matching
//! handlers in registration order. Every request passes through this
//! sequence exactly once; there is no queuing, retry, or background
//! continuation.
//!
//! The dispatcher is agnostic of the host's concurrency model. All of its
//! state is read-only during serving, so a shared `Arc<Dispatcher>` is safe
//! under concurrent requests as long as registration happens before serving
//! begins.

use crate::error::DispatchError;
use crate::events;
use crate::payload;
use crate::registry::{EventHandler, HandlerError, HookRegistry};
use crate::signature::{SignatureVerifier, WebhookSecret};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

// ============================================================================
// Request Types
// ============================================================================

/// The webhook-relevant headers of an inbound request.
///
/// Parsing is lenient: nothing here is validated or required. The
/// dispatcher enforces presence where its state machine needs it, so that a
/// request failing both authentication and header checks is rejected for
/// authentication first.
#[derive(Debug, Clone, Default)]
pub struct HookHeaders {
    /// `X-Github-Event`
    pub event_type: Option<String>,
    /// `X-Github-Delivery`
    pub delivery_id: Option<String>,
    /// `X-Hub-Signature`
    pub signature: Option<String>,
    /// `Content-Type`
    pub content_type: Option<String>,
}

impl HookHeaders {
    /// Collect the relevant headers from an HTTP header map.
    ///
    /// Keys are expected lowercase (the HTTP layer lowercases them); the
    /// canonical mixed-case spellings are accepted as a fallback for
    /// callers constructing maps by hand.
    pub fn from_http_headers(headers: &HashMap<String, String>) -> Self {
        let get = |lower: &str, canonical: &str| {
            headers
                .get(lower)
                .or_else(|| headers.get(canonical))
                .cloned()
        };

        Self {
            event_type: get("x-github-event", crate::header::EVENT_TYPE),
            delivery_id: get("x-github-delivery", crate::header::DELIVERY_ID),
            signature: get("x-hub-signature", crate::header::SIGNATURE),
            content_type: get("content-type", crate::header::CONTENT_TYPE),
        }
    }
}

/// One inbound webhook delivery: headers plus the raw body bytes.
///
/// The body is captured before any parsing so the signature check always
/// sees the byte-for-byte original.
#[derive(Debug, Clone)]
pub struct HookRequest {
    pub headers: HookHeaders,
    pub body: Bytes,
    pub received_at: DateTime<Utc>,
}

impl HookRequest {
    /// Create a request stamped with the current time.
    pub fn new(headers: HookHeaders, body: Bytes) -> Self {
        Self {
            headers,
            body,
            received_at: Utc::now(),
        }
    }

    /// Event type from the headers, if present.
    pub fn event_type(&self) -> Option<&str> {
        self.headers.event_type.as_deref()
    }

    /// Delivery id from the headers, if present.
    pub fn delivery_id(&self) -> Option<&str> {
        self.headers.delivery_id.as_deref()
    }

    /// Signature header value, if present.
    pub fn signature(&self) -> Option<&str> {
        self.headers.signature.as_deref()
    }

    /// Content type, if present.
    pub fn content_type(&self) -> Option<&str> {
        self.headers.content_type.as_deref()
    }
}

/// Summary of a completed dispatch, for logging and response shaping.
///
/// The HTTP response is the same regardless of how many handlers ran; this
/// exists for observability, not control flow.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub event_type: String,
    pub delivery_id: Option<String>,
    pub handlers_invoked: usize,
}

// ============================================================================
// Dispatcher
// ============================================================================

/// Signature-verified webhook event dispatcher.
///
/// Construct one at startup, register handlers, then share it behind an
/// `Arc` with the HTTP layer. Authentication is opt-in: without a secret
/// every request passes the verification stage.
///
/// # Examples
///
/// ```rust
/// use hook_relay_core::{Dispatcher, EventKind, WebhookSecret};
///
/// let mut dispatcher = Dispatcher::with_secret(WebhookSecret::from("secret"));
/// dispatcher.register_fn(EventKind::Ping, |payload| {
///     println!("zen: {}", payload["zen"]);
///     Ok(())
/// });
/// ```
#[derive(Debug, Default)]
pub struct Dispatcher {
    registry: HookRegistry,
    verifier: Option<SignatureVerifier>,
}

impl Dispatcher {
    /// Create a dispatcher with no secret; authentication is disabled until
    /// one is set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dispatcher that authenticates every request against
    /// `secret`.
    pub fn with_secret(secret: WebhookSecret) -> Self {
        Self {
            registry: HookRegistry::new(),
            verifier: Some(SignatureVerifier::new(secret)),
        }
    }

    /// Set or replace the shared secret.
    pub fn set_secret(&mut self, secret: WebhookSecret) {
        match &mut self.verifier {
            Some(verifier) => verifier.set_secret(secret),
            None => self.verifier = Some(SignatureVerifier::new(secret)),
        }
    }

    /// Late-binding secret override.
    ///
    /// `Some` replaces the configured secret; `None` preserves whatever was
    /// configured before, so re-attaching the dispatcher to a host never
    /// silently clears authentication.
    pub fn rebind(&mut self, secret: Option<WebhookSecret>) {
        if let Some(secret) = secret {
            self.set_secret(secret);
        }
    }

    /// Whether a secret is configured.
    pub fn has_secret(&self) -> bool {
        self.verifier.is_some()
    }

    /// Register a handler for an event type. See [`HookRegistry::register`].
    pub fn register(&mut self, event_type: impl Into<String>, handler: Arc<dyn EventHandler>) {
        self.registry.register(event_type, handler);
    }

    /// Register a synchronous closure for an event type.
    pub fn register_fn<F>(&mut self, event_type: impl Into<String>, handler: F)
    where
        F: Fn(&Value) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        self.registry.register_fn(event_type, handler);
    }

    /// The underlying registry.
    pub fn registry(&self) -> &HookRegistry {
        &self.registry
    }

    /// Run the full dispatch sequence for one inbound request.
    ///
    /// 1. Verify the signature against the raw body, if a secret is
    ///    configured. Failure rejects before anything is parsed.
    /// 2. Require the `X-Github-Event` header.
    /// 3. Decode the payload per the `Content-Type` header.
    /// 4. Invoke the handlers registered for the event type in registration
    ///    order. The first handler error aborts the rest and propagates.
    ///
    /// The delivery id is read for log correlation only; its absence never
    /// blocks dispatch. Zero matching handlers is a success.
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchError`] for rejected requests and for handler
    /// failures; see the taxonomy there for the HTTP mapping.
    pub async fn dispatch(&self, request: &HookRequest) -> Result<DispatchOutcome, DispatchError> {
        if let Some(verifier) = &self.verifier {
            verifier.verify(&request.body, request.signature()).map_err(|e| {
                warn!(error = %e, "webhook signature verification failed");
                DispatchError::Authentication(e)
            })?;
        }

        let event_type = request.event_type().ok_or(DispatchError::MissingHeader {
            name: crate::header::EVENT_TYPE,
        })?;

        let payload = payload::extract_payload(request.content_type(), &request.body)?;

        info!(
            event = %events::describe(event_type, &payload),
            delivery_id = request.delivery_id().unwrap_or("-"),
            "received webhook"
        );

        let handlers = self.registry.handlers_for(event_type);
        for (index, handler) in handlers.iter().enumerate() {
            handler.handle(&payload).await.map_err(|source| {
                warn!(
                    event_type,
                    handler_index = index,
                    error = %source,
                    "handler failed; skipping remaining handlers"
                );
                DispatchError::Handler {
                    event_type: event_type.to_string(),
                    source,
                }
            })?;
        }

        debug!(event_type, handlers = handlers.len(), "dispatch complete");

        Ok(DispatchOutcome {
            event_type: event_type.to_string(),
            delivery_id: request.delivery_id().map(str::to_string),
            handlers_invoked: handlers.len(),
        })
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
