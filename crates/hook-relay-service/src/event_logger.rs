//! Built-in logging handler registered by the service binary.
//!
//! A bare deployment of the service has no caller-supplied handlers, so the
//! binary registers one of these per configured event type. It turns each
//! delivery into a structured log line and never fails.

use async_trait::async_trait;
use hook_relay_core::events;
use hook_relay_core::registry::{EventHandler, HandlerError};
use serde_json::Value;
use tracing::info;

/// Handler that logs a one-line summary of every delivery it receives.
pub struct EventLogger {
    event_type: String,
}

impl EventLogger {
    /// Create a logger for deliveries of `event_type`.
    ///
    /// Handlers only receive the payload, so the event type they were
    /// registered under is captured here for the log line.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
        }
    }
}

#[async_trait]
impl EventHandler for EventLogger {
    async fn handle(&self, payload: &Value) -> Result<(), HandlerError> {
        info!(
            event_type = %self.event_type,
            summary = %events::describe(&self.event_type, payload),
            "webhook event"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "event_logger_tests.rs"]
mod tests;
