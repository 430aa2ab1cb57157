//! Dispatch error taxonomy.

use crate::payload::PayloadError;
use crate::registry::HandlerError;
use crate::signature::SignatureError;

/// Terminal failures of a single dispatch call.
///
/// The first three variants are rejections decided by the dispatcher itself
/// and map to 400-class HTTP responses. [`Handler`](Self::Handler) is
/// different by contract: the dispatcher does not absorb or classify
/// handler failures, it only carries them to the hosting layer, which
/// decides the resulting response.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Signature verification failed while a secret was configured.
    #[error("invalid signature")]
    Authentication(#[from] SignatureError),

    /// A required header was absent.
    #[error("missing header: {name}")]
    MissingHeader { name: &'static str },

    /// The body was not decodable per its content type.
    #[error(transparent)]
    InvalidBody(#[from] PayloadError),

    /// A handler failed; remaining handlers for the request were skipped.
    #[error("handler failed for '{event_type}' event: {source}")]
    Handler {
        event_type: String,
        #[source]
        source: HandlerError,
    },
}

impl DispatchError {
    /// Whether the failure was a request rejection (as opposed to a
    /// handler failure surfaced through the dispatcher).
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::Handler { .. })
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
