//! Error types for the HTTP service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hook_relay_core::DispatchError;
use tracing::{error, warn};

/// Webhook handler error with HTTP status code mapping.
///
/// Wraps [`DispatchError`] and maps it onto the response contract:
///
/// - authentication failure → `400 Bad Request`, body `Invalid signature`
///   (the concrete verification failure is logged, never returned, so a
///   probing client learns nothing about why it failed)
/// - missing required header → `400 Bad Request` naming the header
/// - undecodable body → `400 Bad Request` with the body diagnostic
/// - handler failure → `500 Internal Server Error` with a generic body;
///   the dispatcher deliberately does not absorb handler errors, so this
///   layer is where they become a response
///
/// Bodies are short plain-text diagnostics, not JSON.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct WebhookHandlerError(#[from] pub DispatchError);

impl IntoResponse for WebhookHandlerError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            DispatchError::Authentication(ref e) => {
                warn!(error = %e, "rejecting webhook: signature verification failed");
                (StatusCode::BAD_REQUEST, "Invalid signature".to_string())
            }
            DispatchError::MissingHeader { name } => {
                (StatusCode::BAD_REQUEST, format!("Missing header: {}", name))
            }
            DispatchError::InvalidBody(ref e) => {
                (StatusCode::BAD_REQUEST, format!("Bad request body: {}", e))
            }
            DispatchError::Handler {
                ref event_type,
                ref source,
            } => {
                // Detail is logged server-side; the client gets a generic body
                error!(event_type, error = %source, "handler failed during dispatch");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, message).into_response()
    }
}

/// Service-level errors.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("failed to bind to address {address}: {message}")]
    BindFailed { address: String, message: String },

    #[error("server failed: {message}")]
    ServerFailed { message: String },

    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {message}")]
    Invalid { message: String },

    #[error("failed to load configuration: {message}")]
    Load { message: String },
}

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;
