//! # Hook Relay HTTP Service
//!
//! HTTP layer for the Hook Relay webhook dispatcher.
//!
//! This crate adapts [`hook_relay_core`] to axum:
//! - the `POST` dispatch endpoint (default `/postreceive`)
//! - a health check endpoint
//! - error-to-HTTP-response mapping (see [`errors`])
//! - server startup with graceful shutdown
//! - [`Webhook`], a two-phase binding type for embedding the dispatcher in
//!   an existing axum application
//!
//! The response contract is deliberately flat: a successfully dispatched
//! request always produces `204 No Content` with an empty body, regardless
//! of how many handlers ran. Rejections are 400-class with a short
//! plain-text diagnostic.

pub mod config;
pub mod errors;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

use axum::{
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use hook_relay_core::{
    Dispatcher, EventHandler, HandlerError, HookHeaders, HookRequest, WebhookSecret,
};
use serde::Serialize;
use std::{collections::HashMap, sync::Arc};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

pub use config::{LoggingConfig, ServerConfig, ServiceConfig, WebhookConfig};
pub use errors::{ConfigError, ServiceError, WebhookHandlerError};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Configuration for the service
    pub config: ServiceConfig,

    /// Dispatcher shared across all requests
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    /// Create new application state.
    pub fn new(config: ServiceConfig, dispatcher: Arc<Dispatcher>) -> Self {
        Self { config, dispatcher }
    }
}

// ============================================================================
// HTTP Server
// ============================================================================

/// Create the HTTP router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    let webhook_routes = Router::new().route(
        &state.config.webhook.endpoint_path,
        post(handle_postreceive),
    );

    let health_routes = Router::new().route("/health", get(handle_health_check));

    Router::new()
        .merge(webhook_routes)
        .merge(health_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .into_inner(),
        )
        .layer(DefaultBodyLimit::max(state.config.server.max_body_size))
        .with_state(state)
}

/// Start the HTTP server and serve until shutdown.
pub async fn start_server(
    config: ServiceConfig,
    dispatcher: Arc<Dispatcher>,
) -> Result<(), ServiceError> {
    config.validate()?;

    let address = format!("{}:{}", config.server.host, config.server.port);
    let shutdown_timeout = std::time::Duration::from_secs(config.server.shutdown_timeout_seconds);

    let state = AppState::new(config, dispatcher);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| ServiceError::BindFailed {
            address: address.clone(),
            message: e.to_string(),
        })?;

    info!(%address, "starting HTTP server");

    let shutdown_signal = async move {
        let ctrl_c = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install Ctrl+C signal handler");
        };

        #[cfg(unix)]
        let terminate = async {
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("Failed to install SIGTERM signal handler")
                .recv()
                .await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                info!(timeout_seconds = shutdown_timeout.as_secs(), "received SIGINT, shutting down");
            },
            _ = terminate => {
                info!(timeout_seconds = shutdown_timeout.as_secs(), "received SIGTERM, shutting down");
            },
        }
    };

    // In-flight requests are allowed to complete; new connections are
    // refused as soon as the signal arrives.
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| ServiceError::ServerFailed {
            message: e.to_string(),
        })?;

    info!("HTTP server shutdown complete");
    Ok(())
}

// ============================================================================
// Webhook Handler
// ============================================================================

/// Handle one webhook delivery.
///
/// Lowers the HTTP headers into the dispatcher's header map, captures the
/// raw body bytes before anything parses them, and runs the dispatch
/// sequence. Success is `204 No Content` with an empty body; failures map
/// through [`WebhookHandlerError`].
#[instrument(skip(state, headers, body))]
pub async fn handle_postreceive(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, WebhookHandlerError> {
    let header_map: HashMap<String, String> = headers
        .iter()
        .map(|(k, v)| {
            (
                k.as_str().to_lowercase(),
                v.to_str().unwrap_or("").to_string(),
            )
        })
        .collect();

    let hook_headers = HookHeaders::from_http_headers(&header_map);
    let request = HookRequest::new(hook_headers, body);

    state.dispatcher.dispatch(&request).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Health Check
// ============================================================================

/// Health check response body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

/// Liveness endpoint. The dispatcher has no external dependencies, so
/// serving at all means healthy.
async fn handle_health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}

// ============================================================================
// Two-Phase Binding
// ============================================================================

/// Two-phase webhook binding for embedding in a host application.
///
/// Construct the webhook before the host `Router` exists, register hooks,
/// and attach later. A secret given at [`bind`](Self::bind) time overrides
/// the configured one; binding with `None` preserves it, so attaching to a
/// host never silently drops authentication.
///
/// # Examples
///
/// ```rust
/// use axum::Router;
/// use hook_relay_api::Webhook;
/// use hook_relay_core::{EventKind, WebhookSecret};
///
/// let mut webhook = Webhook::new().with_secret(WebhookSecret::from("secret"));
/// webhook.hook_fn(EventKind::Push, |payload| {
///     println!("push: {}", payload["ref"]);
///     Ok(())
/// });
///
/// // Later, once the host application exists:
/// let app: Router = webhook.attach(Router::new());
/// ```
#[derive(Default)]
pub struct Webhook {
    dispatcher: Dispatcher,
    endpoint_path: Option<String>,
}

impl Webhook {
    /// Create a webhook bound to the default `/postreceive` endpoint, with
    /// authentication disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the endpoint path.
    pub fn with_endpoint(mut self, path: impl Into<String>) -> Self {
        self.endpoint_path = Some(path.into());
        self
    }

    /// Configure the shared secret.
    pub fn with_secret(mut self, secret: WebhookSecret) -> Self {
        self.dispatcher.set_secret(secret);
        self
    }

    /// Register a handler for an event type.
    pub fn hook(&mut self, event_type: impl Into<String>, handler: Arc<dyn EventHandler>) {
        self.dispatcher.register(event_type, handler);
    }

    /// Register a synchronous closure for an event type.
    pub fn hook_fn<F>(&mut self, event_type: impl Into<String>, handler: F)
    where
        F: Fn(&serde_json::Value) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        self.dispatcher.register_fn(event_type, handler);
    }

    /// Late-binding secret override; `None` preserves the configured
    /// secret.
    pub fn bind(&mut self, secret: Option<WebhookSecret>) {
        self.dispatcher.rebind(secret);
    }

    /// Whether a secret is currently configured.
    pub fn has_secret(&self) -> bool {
        self.dispatcher.has_secret()
    }

    /// Build a router carrying only the webhook endpoint.
    ///
    /// Unlike [`create_router`], this adds no health route or middleware,
    /// so it can be merged into a host application without clobbering the
    /// host's own routes.
    pub fn into_router(self) -> Router {
        let mut config = ServiceConfig::default();
        if let Some(path) = self.endpoint_path {
            config.webhook.endpoint_path = path;
        }

        let path = config.webhook.endpoint_path.clone();
        let state = AppState::new(config, Arc::new(self.dispatcher));

        Router::new()
            .route(&path, post(handle_postreceive))
            .with_state(state)
    }

    /// Merge this webhook's routes into a host application's router.
    pub fn attach(self, app: Router) -> Router {
        app.merge(self.into_router())
    }
}
