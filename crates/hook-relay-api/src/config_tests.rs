//! Tests for service configuration.

use super::*;

#[test]
fn test_defaults_are_valid() {
    let config = ServiceConfig::default();

    assert!(config.validate().is_ok());
    assert_eq!(config.webhook.endpoint_path, "/postreceive");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.webhook.secret, None);
    assert_eq!(config.webhook.log_events, vec!["push", "ping"]);
}

#[test]
fn test_empty_document_deserializes_to_defaults() {
    let config: ServiceConfig = serde_json::from_str("{}").unwrap();

    assert!(config.validate().is_ok());
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_partial_document_keeps_other_defaults() {
    let config: ServiceConfig = serde_json::from_str(
        r#"{"webhook": {"endpoint_path": "/hooks/github", "secret": "s3cret"}}"#,
    )
    .unwrap();

    assert_eq!(config.webhook.endpoint_path, "/hooks/github");
    assert_eq!(config.webhook.secret.as_deref(), Some("s3cret"));
    assert_eq!(config.server.port, 8080);
}

#[test]
fn test_zero_port_is_rejected() {
    let mut config = ServiceConfig::default();
    config.server.port = 0;

    assert!(config.validate().is_err());
}

#[test]
fn test_zero_body_limit_is_rejected() {
    let mut config = ServiceConfig::default();
    config.server.max_body_size = 0;

    assert!(config.validate().is_err());
}

#[test]
fn test_relative_endpoint_path_is_rejected() {
    let mut config = ServiceConfig::default();
    config.webhook.endpoint_path = "postreceive".to_string();

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("endpoint_path"));
}

#[test]
fn test_empty_secret_is_rejected() {
    // An empty string is almost certainly a templating mistake; absent is
    // the way to disable authentication
    let mut config = ServiceConfig::default();
    config.webhook.secret = Some(String::new());

    assert!(config.validate().is_err());
}
