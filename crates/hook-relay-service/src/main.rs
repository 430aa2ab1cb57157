//! # Hook Relay Service
//!
//! Binary entry point for the Hook Relay HTTP service.
//!
//! This executable:
//! - Loads configuration from files and the environment
//! - Initializes logging
//! - Builds the dispatcher with the configured secret and registers the
//!   built-in logging handlers
//! - Starts the HTTP server from hook-relay-api

mod event_logger;

use event_logger::EventLogger;
use hook_relay_api::{start_server, ServiceConfig};
use hook_relay_core::{Dispatcher, WebhookSecret};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // -------------------------------------------------------------------------
    // Load configuration
    //
    // Sources (applied in order, later sources override earlier ones):
    //  1. /etc/hook-relay/service.yaml         — system-wide defaults
    //  2. ./config/service.yaml                — deployment-local override
    //  3. Path given by HOOK_RELAY_CONFIG_FILE — operator-specified file
    //  4. Environment variables prefixed HOOK_RELAY__ (double-underscore
    //     separator), e.g. HOOK_RELAY__SERVER__PORT=9090 sets server.port
    //
    // All fields carry serde defaults, so an entirely unconfigured
    // environment produces a valid config. A malformed file or an
    // uncoercible environment variable IS a hard error: it indicates
    // deliberate-but-broken operator configuration.
    //
    // Configuration loads before logging is initialized (the logging setup
    // itself is configurable), so load failures go to stderr.
    // -------------------------------------------------------------------------
    let mut config_builder = config::Config::builder()
        .add_source(
            config::File::with_name("/etc/hook-relay/service")
                .required(false)
                .format(config::FileFormat::Yaml),
        )
        .add_source(
            config::File::with_name("config/service")
                .required(false)
                .format(config::FileFormat::Yaml),
        );

    // Optional explicit path supplied by the operator.
    if let Ok(explicit_path) = std::env::var("HOOK_RELAY_CONFIG_FILE") {
        if !explicit_path.is_empty() {
            config_builder = config_builder.add_source(
                config::File::with_name(&explicit_path)
                    .required(true)
                    .format(config::FileFormat::Yaml),
            );
        }
    }

    let config = match config_builder
        .add_source(config::Environment::with_prefix("HOOK_RELAY").separator("__"))
        .build()
    {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("failed to build configuration: {e}");
            std::process::exit(3);
        }
    };

    let service_config: ServiceConfig = match config.try_deserialize() {
        Ok(sc) => sc,
        Err(e) => {
            eprintln!("could not deserialize service configuration: {e}");
            std::process::exit(3);
        }
    };

    if let Err(e) = service_config.validate() {
        eprintln!("service configuration is invalid: {e}");
        std::process::exit(3);
    }

    // -------------------------------------------------------------------------
    // Initialize logging
    //
    // RUST_LOG overrides the configured level when set.
    // -------------------------------------------------------------------------
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&service_config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if service_config.logging.json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    info!("starting Hook Relay service");

    // -------------------------------------------------------------------------
    // Build the dispatcher
    //
    // The secret comes from configuration; without one, signature
    // verification is disabled and every delivery is accepted at the
    // authentication stage. The built-in logging handler is registered for
    // each configured event type so a bare deployment records what it
    // receives.
    // -------------------------------------------------------------------------
    let mut dispatcher = Dispatcher::new();

    match service_config.webhook.secret.as_deref() {
        Some(secret) => dispatcher.set_secret(WebhookSecret::from(secret)),
        None => info!("no webhook secret configured; signature verification is disabled"),
    }

    for event_type in &service_config.webhook.log_events {
        dispatcher.register(
            event_type.clone(),
            Arc::new(EventLogger::new(event_type.as_str())),
        );
    }

    info!(
        endpoint = %service_config.webhook.endpoint_path,
        port = service_config.server.port,
        log_events = ?service_config.webhook.log_events,
        "dispatcher ready"
    );

    if let Err(e) = start_server(service_config, Arc::new(dispatcher)).await {
        error!(error = %e, "server terminated with error");
        std::process::exit(1);
    }
}
