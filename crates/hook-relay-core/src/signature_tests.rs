//! Tests for webhook signature verification.

use super::*;
use hmac::{Hmac, Mac};
use sha1::Sha1;

/// Compute `sha1=<hex>` for a body and secret without going through the
/// verifier under test.
fn reference_signature(secret: &[u8], body: &[u8]) -> String {
    let mut mac = Hmac::<Sha1>::new_from_slice(secret).unwrap();
    mac.update(body);
    format!("sha1={}", hex::encode(mac.finalize().into_bytes()))
}

#[test]
fn test_correct_signature_passes() {
    // Arrange: the concrete scenario from the dispatch contract
    let verifier = SignatureVerifier::new(WebhookSecret::from("secret"));
    let body = b"something";
    let header = reference_signature(b"secret", body);

    // Act / Assert
    assert!(verifier.verify(body, Some(&header)).is_ok());
}

#[test]
fn test_changed_body_byte_fails() {
    let verifier = SignatureVerifier::new(WebhookSecret::from("secret"));
    let header = reference_signature(b"secret", b"something");

    // Every single-byte mutation of the body must break verification
    let body = b"something";
    for i in 0..body.len() {
        let mut tampered = body.to_vec();
        tampered[i] ^= 0x01;
        assert_eq!(
            verifier.verify(&tampered, Some(&header)),
            Err(SignatureError::Mismatch),
            "mutation at byte {} was not detected",
            i
        );
    }
}

#[test]
fn test_changed_secret_fails() {
    let verifier = SignatureVerifier::new(WebhookSecret::from("tecret"));
    let header = reference_signature(b"secret", b"something");

    assert_eq!(
        verifier.verify(b"something", Some(&header)),
        Err(SignatureError::Mismatch)
    );
}

#[test]
fn test_missing_header_fails() {
    let verifier = SignatureVerifier::new(WebhookSecret::from("secret"));

    assert_eq!(
        verifier.verify(b"something", None),
        Err(SignatureError::MissingHeader)
    );
}

#[test]
fn test_header_without_separator_fails() {
    let verifier = SignatureVerifier::new(WebhookSecret::from("secret"));

    assert_eq!(
        verifier.verify(b"something", Some("sha1deadbeef")),
        Err(SignatureError::Malformed)
    );
}

#[test]
fn test_wrong_algorithm_fails_even_with_correct_digest() {
    let verifier = SignatureVerifier::new(WebhookSecret::from("secret"));

    // Correct digest but a prefix naming a different algorithm
    let header = reference_signature(b"secret", b"something").replace("sha1=", "sha256=");

    assert_eq!(
        verifier.verify(b"something", Some(&header)),
        Err(SignatureError::UnsupportedAlgorithm {
            algorithm: "sha256".to_string()
        })
    );
}

#[test]
fn test_non_hex_digest_fails() {
    let verifier = SignatureVerifier::new(WebhookSecret::from("secret"));

    assert_eq!(
        verifier.verify(b"something", Some("sha1=not-hex")),
        Err(SignatureError::InvalidHex)
    );
}

#[test]
fn test_digest_splits_on_first_equals() {
    // A digest containing '=' is invalid hex, but the parse itself must
    // split only on the first separator, mirroring GitHub's header format.
    let verifier = SignatureVerifier::new(WebhookSecret::from("secret"));

    assert_eq!(
        verifier.verify(b"something", Some("sha1=ab=cd")),
        Err(SignatureError::InvalidHex)
    );
}

#[test]
fn test_truncated_digest_fails() {
    let verifier = SignatureVerifier::new(WebhookSecret::from("secret"));
    let full = reference_signature(b"secret", b"something");
    let truncated = &full[..full.len() - 2];

    assert_eq!(
        verifier.verify(b"something", Some(truncated)),
        Err(SignatureError::Mismatch)
    );
}

#[test]
fn test_sign_round_trips_through_verify() {
    let verifier = SignatureVerifier::new(WebhookSecret::from("another secret"));
    let body = br#"{"zen":"Design for failure."}"#;

    let header = verifier.sign(body);

    assert!(header.starts_with("sha1="));
    assert!(verifier.verify(body, Some(&header)).is_ok());
}

#[test]
fn test_set_secret_replaces_old_secret() {
    let mut verifier = SignatureVerifier::new(WebhookSecret::from("old"));
    let header = reference_signature(b"new", b"something");

    assert!(verifier.verify(b"something", Some(&header)).is_err());

    verifier.set_secret(WebhookSecret::from("new"));
    assert!(verifier.verify(b"something", Some(&header)).is_ok());
}

#[test]
fn test_secret_debug_is_redacted() {
    let secret = WebhookSecret::from("super-secret-value");
    let debug = format!("{:?}", secret);

    assert!(!debug.contains("super-secret-value"));
    assert!(debug.contains("REDACTED"));

    let verifier = SignatureVerifier::new(secret);
    let debug = format!("{:?}", verifier);
    assert!(!debug.contains("super-secret-value"));
}

#[test]
fn test_empty_body_verifies() {
    // GitHub never sends an empty body, but the verifier is defined over
    // arbitrary byte sequences
    let verifier = SignatureVerifier::new(WebhookSecret::from("secret"));
    let header = reference_signature(b"secret", b"");

    assert!(verifier.verify(b"", Some(&header)).is_ok());
}
