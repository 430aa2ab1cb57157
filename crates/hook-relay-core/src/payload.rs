//! Webhook payload extraction.
//!
//! GitHub delivers payloads in one of two encodings, selected by the
//! `Content-Type` header:
//!
//! - `application/json`: the body is the JSON document itself
//! - `application/x-www-form-urlencoded`: the body is a form whose `payload`
//!   field holds the JSON document as a string
//!
//! Extraction only ever parses the raw bytes; it never mutates or
//! re-serializes them, so the bytes the signature verifier saw are exactly
//! the bytes decoded here.

use serde_json::Value;

/// Form field carrying the JSON document in form-encoded deliveries.
pub const FORM_PAYLOAD_FIELD: &str = "payload";

/// Errors produced while decoding a request body into a payload.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    /// The request carried no `Content-Type` header.
    #[error("missing Content-Type header")]
    MissingContentType,

    /// The content type selects neither decoding strategy.
    #[error("unsupported content type: {content_type}")]
    UnsupportedContentType { content_type: String },

    /// The form body has no `payload` field.
    #[error("form body is missing the 'payload' field")]
    MissingPayloadField,

    /// The body (or the `payload` field) is not decodable JSON.
    #[error("request body must contain json: {message}")]
    MalformedJson { message: String },
}

/// Decode a request body into its JSON payload.
///
/// Branches on `content_type` as described in the module docs. Any content
/// type parameters (`; charset=utf-8` and friends) are ignored when
/// selecting the strategy.
///
/// A body that decodes to JSON `null` is rejected: an empty or absent
/// document carries no event and is treated the same as undecodable JSON.
///
/// # Errors
///
/// Returns a [`PayloadError`] when the content type is absent or
/// unsupported, the form field is missing, or the JSON cannot be decoded.
pub fn extract_payload(content_type: Option<&str>, body: &[u8]) -> Result<Value, PayloadError> {
    let content_type = content_type.ok_or(PayloadError::MissingContentType)?;

    // Strip parameters: "application/json; charset=utf-8" -> "application/json"
    let media_type = content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim();

    let payload: Value = match media_type {
        "application/json" => {
            serde_json::from_slice(body).map_err(|e| PayloadError::MalformedJson {
                message: e.to_string(),
            })?
        }
        "application/x-www-form-urlencoded" => {
            let json = url::form_urlencoded::parse(body)
                .find(|(key, _)| key == FORM_PAYLOAD_FIELD)
                .map(|(_, value)| value.into_owned())
                .ok_or(PayloadError::MissingPayloadField)?;

            serde_json::from_str(&json).map_err(|e| PayloadError::MalformedJson {
                message: e.to_string(),
            })?
        }
        _ => {
            return Err(PayloadError::UnsupportedContentType {
                content_type: content_type.to_string(),
            });
        }
    };

    if payload.is_null() {
        return Err(PayloadError::MalformedJson {
            message: "JSON body is null".to_string(),
        });
    }

    Ok(payload)
}

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;
