//! Webhook signature verification.
//!
//! GitHub signs each delivery by computing HMAC-SHA1 over the raw request
//! body with the shared webhook secret and sending the result as
//! `X-Hub-Signature: sha1=<hex digest>`. This module parses that header and
//! recomputes the digest over the exact body bytes, comparing the two in
//! constant time to prevent timing-based digest recovery.
//!
//! Verification is opt-in: a dispatcher without a configured secret never
//! consults this module.

use hmac::{Hmac, Mac};
use sha1::Sha1;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

type HmacSha1 = Hmac<Sha1>;

/// The only digest algorithm this verifier implements.
const ALGORITHM: &str = "sha1";

/// Errors produced while verifying a presented signature.
///
/// All variants terminate the dispatch with an authentication failure; the
/// distinction exists for logging, not for the HTTP response, which reports
/// a uniform "Invalid signature" to avoid leaking why verification failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    /// A secret is configured but the request carried no signature header.
    #[error("missing {} header", crate::header::SIGNATURE)]
    MissingHeader,

    /// The header value has no `=` separator between algorithm and digest.
    #[error("signature header is not in 'algorithm=hexdigest' form")]
    Malformed,

    /// The header names an algorithm this verifier does not implement.
    #[error("unsupported signature algorithm: {algorithm}")]
    UnsupportedAlgorithm { algorithm: String },

    /// The digest portion of the header is not valid hex.
    #[error("signature digest is not valid hex")]
    InvalidHex,

    /// The presented digest does not match the computed digest.
    #[error("signature digest does not match payload")]
    Mismatch,
}

/// Shared secret used to authenticate webhook deliveries.
///
/// The secret is an opaque byte sequence. It is zeroized when dropped and
/// its `Debug` representation is redacted so it cannot leak through logs.
#[derive(Clone)]
pub struct WebhookSecret(Zeroizing<Vec<u8>>);

impl WebhookSecret {
    /// Wrap raw secret bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(bytes.into()))
    }

    /// The raw secret bytes, for HMAC keying.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<&str> for WebhookSecret {
    fn from(value: &str) -> Self {
        Self::new(value.as_bytes().to_vec())
    }
}

impl From<String> for WebhookSecret {
    fn from(value: String) -> Self {
        Self::new(value.into_bytes())
    }
}

impl From<Vec<u8>> for WebhookSecret {
    fn from(value: Vec<u8>) -> Self {
        Self::new(value)
    }
}

// Security: don't expose the secret in debug output
impl std::fmt::Debug for WebhookSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("WebhookSecret").field(&"<REDACTED>").finish()
    }
}

/// Verifies `X-Hub-Signature` headers against a configured secret.
///
/// The digest is always computed over the raw, unparsed body bytes so that
/// downstream parsing differences cannot affect the result.
///
/// # Examples
///
/// ```rust
/// use hook_relay_core::signature::{SignatureVerifier, WebhookSecret};
///
/// let verifier = SignatureVerifier::new(WebhookSecret::from("secret"));
/// let header = verifier.sign(b"something");
///
/// assert!(verifier.verify(b"something", Some(&header)).is_ok());
/// assert!(verifier.verify(b"something else", Some(&header)).is_err());
/// ```
#[derive(Clone)]
pub struct SignatureVerifier {
    secret: WebhookSecret,
}

impl SignatureVerifier {
    /// Create a verifier for the given secret.
    pub fn new(secret: WebhookSecret) -> Self {
        Self { secret }
    }

    /// Replace the secret this verifier checks against.
    pub fn set_secret(&mut self, secret: WebhookSecret) {
        self.secret = secret;
    }

    /// Verify a presented signature header against the raw body bytes.
    ///
    /// The header is parsed as `algorithm "=" hexdigest` on the first `=`.
    /// A missing header, a value without a separator, an algorithm other
    /// than `sha1`, or an undecodable digest all fail verification before
    /// any HMAC computation takes place.
    ///
    /// # Errors
    ///
    /// Returns a [`SignatureError`] describing the first check that failed.
    pub fn verify(
        &self,
        body: &[u8],
        signature_header: Option<&str>,
    ) -> Result<(), SignatureError> {
        let header = signature_header.ok_or(SignatureError::MissingHeader)?;

        let (algorithm, hex_digest) =
            header.split_once('=').ok_or(SignatureError::Malformed)?;

        if algorithm != ALGORITHM {
            return Err(SignatureError::UnsupportedAlgorithm {
                algorithm: algorithm.to_string(),
            });
        }

        let presented = hex::decode(hex_digest).map_err(|_| SignatureError::InvalidHex)?;
        let expected = self.compute_digest(body);

        if constant_time_eq(&presented, &expected) {
            Ok(())
        } else {
            Err(SignatureError::Mismatch)
        }
    }

    /// Produce the full `sha1=<hex>` header value for a body.
    ///
    /// Used by tests and by callers that need to sign outbound test
    /// deliveries; verification never round-trips through this.
    pub fn sign(&self, body: &[u8]) -> String {
        format!("{}={}", ALGORITHM, hex::encode(self.compute_digest(body)))
    }

    fn compute_digest(&self, body: &[u8]) -> Vec<u8> {
        let mut mac = HmacSha1::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(body);
        mac.finalize().into_bytes().to_vec()
    }
}

// Security: don't expose the secret through the verifier either
impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("secret", &"<REDACTED>")
            .finish()
    }
}

/// Constant-time equality over digest bytes.
///
/// The length check is not constant time; digest lengths are public
/// knowledge (20 bytes for SHA-1) so this leaks nothing useful.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
#[path = "signature_tests.rs"]
mod tests;
