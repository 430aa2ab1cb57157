//! Service configuration types.
//!
//! Every field carries a serde default so an entirely unconfigured
//! deployment starts with working built-in values. Validation runs after
//! deserialization; a present-but-broken value is a hard error.

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};

/// Top-level service configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP server settings
    pub server: ServerConfig,

    /// Webhook endpoint settings
    pub webhook: WebhookConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl ServiceConfig {
    /// Validate the configuration as a whole.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid {
                message: "server.port must be non-zero".to_string(),
            });
        }

        if self.server.max_body_size == 0 {
            return Err(ConfigError::Invalid {
                message: "server.max_body_size must be non-zero".to_string(),
            });
        }

        if !self.webhook.endpoint_path.starts_with('/') {
            return Err(ConfigError::Invalid {
                message: format!(
                    "webhook.endpoint_path must start with '/', got '{}'",
                    self.webhook.endpoint_path
                ),
            });
        }

        if matches!(self.webhook.secret.as_deref(), Some("")) {
            return Err(ConfigError::Invalid {
                message: "webhook.secret must not be empty when set".to_string(),
            });
        }

        Ok(())
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout_seconds: u64,

    /// Maximum request body size in bytes
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout_seconds: 30,
            // GitHub caps webhook payloads at 25MB
            max_body_size: 25 * 1024 * 1024,
        }
    }
}

/// Webhook endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// Path the dispatch endpoint is bound to
    pub endpoint_path: String,

    /// Shared secret for signature verification; absent disables
    /// authentication
    pub secret: Option<String>,

    /// Event types the built-in logging handler is registered for
    pub log_events: Vec<String>,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            endpoint_path: "/postreceive".to_string(),
            secret: None,
            log_events: vec!["push".to_string(), "ping".to_string()],
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Logging level filter
    pub level: String,

    /// Enable JSON structured logging
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
