//! Tests for the built-in logging handler.

use super::*;
use serde_json::json;

#[tokio::test]
async fn test_logger_never_fails() {
    let logger = EventLogger::new("push");

    let payload = json!({
        "pusher": {"name": "octocat"},
        "ref": "refs/heads/main",
        "repository": {"full_name": "octo/repo"},
    });

    assert!(logger.handle(&payload).await.is_ok());
}

#[tokio::test]
async fn test_logger_tolerates_sparse_payloads() {
    // Partial or unknown payload shapes must not break logging
    let logger = EventLogger::new("merge_group");

    assert!(logger.handle(&json!({})).await.is_ok());
    assert!(logger.handle(&json!([1, 2, 3])).await.is_ok());
}
