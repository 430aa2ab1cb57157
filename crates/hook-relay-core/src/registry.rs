//! Handler registration and lookup.
//!
//! The registry maps event-type names to ordered lists of handlers.
//! Registration order is invocation order; the same handler may be
//! registered more than once and runs once per registration. Zero handlers
//! for a type is a valid state, not an error.
//!
//! Registration is a setup-time activity: the registry is populated before
//! the dispatcher starts serving and is read-only afterwards, so no
//! synchronization is needed on the lookup path.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Error type handlers may fail with.
///
/// The dispatcher never absorbs these: a handler failure aborts the
/// remaining handlers for the request and propagates to the hosting layer.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Caller-supplied logic invoked with a decoded event payload.
///
/// Handlers are side-effecting; the dispatcher ignores everything about a
/// successful run and propagates errors unchanged.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use hook_relay_core::registry::{EventHandler, HandlerError};
/// use serde_json::Value;
///
/// struct DeployNotifier;
///
/// #[async_trait]
/// impl EventHandler for DeployNotifier {
///     async fn handle(&self, payload: &Value) -> Result<(), HandlerError> {
///         println!("deploying {}", payload["deployment"]["ref"]);
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Process one decoded payload.
    async fn handle(&self, payload: &Value) -> Result<(), HandlerError>;
}

/// Adapter that lets a plain synchronous closure act as a handler.
struct FnHandler<F>(F);

#[async_trait]
impl<F> EventHandler for FnHandler<F>
where
    F: Fn(&Value) -> Result<(), HandlerError> + Send + Sync,
{
    async fn handle(&self, payload: &Value) -> Result<(), HandlerError> {
        (self.0)(payload)
    }
}

/// Mapping from event-type name to ordered handler list.
///
/// Keys are open strings; [`EventKind`](crate::EventKind) converts into the
/// same key space, so the enumerated and raw-string registration forms reach
/// the same slot.
#[derive(Default)]
pub struct HookRegistry {
    hooks: HashMap<String, Vec<Arc<dyn EventHandler>>>,
}

impl HookRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler to the list for `event_type`, creating the list if
    /// absent. No uniqueness constraint is applied.
    pub fn register(&mut self, event_type: impl Into<String>, handler: Arc<dyn EventHandler>) {
        self.hooks.entry(event_type.into()).or_default().push(handler);
    }

    /// Register a synchronous closure as a handler.
    ///
    /// This is the ergonomic path for simple side-effecting hooks that have
    /// no state of their own.
    pub fn register_fn<F>(&mut self, event_type: impl Into<String>, handler: F)
    where
        F: Fn(&Value) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        self.register(event_type, Arc::new(FnHandler(handler)));
    }

    /// The handlers registered for `event_type`, in registration order.
    ///
    /// Returns an empty slice for unregistered types, including types
    /// outside the known catalog.
    pub fn handlers_for(&self, event_type: &str) -> &[Arc<dyn EventHandler>] {
        self.hooks
            .get(event_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Event types with at least one registered handler.
    pub fn event_types(&self) -> impl Iterator<Item = &str> {
        self.hooks.keys().map(String::as_str)
    }

    /// Total number of registrations across all event types.
    pub fn handler_count(&self) -> usize {
        self.hooks.values().map(Vec::len).sum()
    }

    /// Whether no handlers are registered at all.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut counts: Vec<(&str, usize)> = self
            .hooks
            .iter()
            .map(|(k, v)| (k.as_str(), v.len()))
            .collect();
        counts.sort_unstable();
        f.debug_struct("HookRegistry").field("hooks", &counts).finish()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
