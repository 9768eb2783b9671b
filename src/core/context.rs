//! Request-scoped context propagated alongside log messages
//!
//! `Context` is an opaque handle the facade stores and forwards without ever
//! inspecting it. It carries request-scoped values and a cancellation flag
//! shared by every context derived from the same root.

use super::fields::FieldValue;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

struct ContextNode {
    key: String,
    value: FieldValue,
    parent: Option<Arc<ContextNode>>,
}

/// Cheap-to-clone propagation token.
///
/// Values form an immutable chain: `with_value` returns a child that sees its
/// own value plus everything its parent carries. Cancellation is shared across
/// the whole family created from one `background()` call.
///
/// # Example
///
/// ```
/// use ecto_logger::Context;
///
/// let root = Context::background();
/// let request = root.with_value("request_id", "req-42");
///
/// assert_eq!(request.value("request_id").map(|v| v.to_string()), Some("req-42".to_string()));
/// assert!(root.value("request_id").is_none());
///
/// root.cancel();
/// assert!(request.is_cancelled());
/// ```
#[derive(Clone)]
pub struct Context {
    values: Option<Arc<ContextNode>>,
    cancelled: Arc<AtomicBool>,
}

impl Context {
    /// Create an empty, non-cancelled root context
    #[must_use]
    pub fn background() -> Self {
        Self {
            values: None,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Derive a child context carrying one more value
    ///
    /// A key already present higher up the chain is shadowed, not replaced.
    #[must_use]
    pub fn with_value<K, V>(&self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        Self {
            values: Some(Arc::new(ContextNode {
                key: key.into(),
                value: value.into(),
                parent: self.values.clone(),
            })),
            cancelled: Arc::clone(&self.cancelled),
        }
    }

    /// Look up a value, nearest derivation first
    pub fn value(&self, key: &str) -> Option<&FieldValue> {
        let mut node = self.values.as_deref();
        while let Some(current) = node {
            if current.key == key {
                return Some(&current.value);
            }
            node = current.parent.as_deref();
        }
        None
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// True when both handles are the same derivation of the same family
    pub fn same_as(&self, other: &Context) -> bool {
        let same_values = match (&self.values, &other.values) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same_values && Arc::ptr_eq(&self.cancelled, &other.cancelled)
    }

    fn keys(&self) -> Vec<&str> {
        let mut keys = Vec::new();
        let mut node = self.values.as_deref();
        while let Some(current) = node {
            keys.push(current.key.as_str());
            node = current.parent.as_deref();
        }
        keys
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::background()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("keys", &self.keys())
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
