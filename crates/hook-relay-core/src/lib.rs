//! # Hook Relay Core
//!
//! Core dispatch logic for the Hook Relay webhook service.
//!
//! This crate receives GitHub webhook deliveries (as headers plus raw body
//! bytes), authenticates them against an optional shared secret, decodes the
//! JSON payload, and fans the event out to handlers registered per event
//! type. It has no HTTP dependencies of its own; the `hook-relay-api` crate
//! adapts it to axum.
//!
//! ## Components
//!
//! - [`SignatureVerifier`] - HMAC-SHA1 verification of the `X-Hub-Signature`
//!   header with constant-time comparison
//! - [`payload`] - Content-Type aware body decoding (direct JSON or the
//!   `payload` field of a form-encoded body)
//! - [`HookRegistry`] - ordered per-event-type handler registration
//! - [`Dispatcher`] - per-request orchestration of the above
//!
//! ## Usage
//!
//! ```rust
//! use hook_relay_core::{Dispatcher, EventKind, WebhookSecret};
//!
//! let mut dispatcher = Dispatcher::with_secret(WebhookSecret::from("secret"));
//! dispatcher.register_fn(EventKind::Push, |payload| {
//!     println!("push to {}", payload["repository"]["full_name"]);
//!     Ok(())
//! });
//! ```

pub mod dispatcher;
pub mod error;
pub mod events;
pub mod payload;
pub mod registry;
pub mod signature;

// Re-export the main types at the crate root
pub use dispatcher::{DispatchOutcome, Dispatcher, HookHeaders, HookRequest};
pub use error::DispatchError;
pub use events::EventKind;
pub use payload::PayloadError;
pub use registry::{EventHandler, HandlerError, HookRegistry};
pub use signature::{SignatureError, SignatureVerifier, WebhookSecret};

/// Semantic header names consumed by the dispatcher.
///
/// Lookups are case-insensitive (the HTTP layer lowercases keys before
/// handing them to [`HookHeaders::from_http_headers`]); these constants
/// carry the canonical spelling used in responses and documentation.
pub mod header {
    /// Event type of the delivery. Required on every request.
    pub const EVENT_TYPE: &str = "X-Github-Event";

    /// Opaque delivery identifier. Used for log correlation only.
    pub const DELIVERY_ID: &str = "X-Github-Delivery";

    /// HMAC signature, `sha1=<hex>`. Required when a secret is configured.
    pub const SIGNATURE: &str = "X-Hub-Signature";

    /// Selects the body decoding strategy.
    pub const CONTENT_TYPE: &str = "Content-Type";
}
