//! Method registry
//!
//! The registry maps method names to their handlers. It is built once by
//! [`RegistryBuilder`] before the server starts and never mutated
//! afterwards, so lookups from concurrent connection tasks need no
//! synchronization.
//!
//! Storage is an ordered map, which keeps `methods()` output deterministic
//! and gives O(log n) lookup. Handlers are held behind `Arc` so a lookup
//! hands out a cheap clone rather than borrowing into the registry.

use crate::handler::Handler;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Immutable name-to-handler table
///
/// Read-only after construction; safe to share across connection tasks via
/// `Arc` without locking.
pub struct MethodRegistry {
    handlers: BTreeMap<String, Arc<dyn Handler>>,
}

impl MethodRegistry {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Resolve a method name to its handler.
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Handler>> {
        self.handlers.get(name).cloned()
    }

    /// Check whether a method is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// All registered method names, in sorted order.
    pub fn methods(&self) -> Vec<String> {
        self.handlers.keys().cloned().collect()
    }

    /// Number of registered methods.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// True when no methods are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// Builder for [`MethodRegistry`]
///
/// Registration happens only here, at startup; `build()` freezes the table.
/// Registering the same name twice replaces the earlier handler.
pub struct RegistryBuilder {
    handlers: BTreeMap<String, Arc<dyn Handler>>,
}

impl RegistryBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    /// Register a handler under a method name.
    pub fn register(mut self, method: impl Into<String>, handler: Box<dyn Handler>) -> Self {
        self.handlers.insert(method.into(), Arc::from(handler));
        self
    }

    /// Freeze the table into an immutable registry.
    pub fn build(self) -> MethodRegistry {
        MethodRegistry {
            handlers: self.handlers,
        }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::from_fn;

    #[test]
    fn test_lookup_hit_and_miss() {
        let registry = MethodRegistry::builder()
            .register("time", from_fn(|_| async { Ok(serde_json::json!(0)) }))
            .build();

        assert!(registry.lookup("time").is_some());
        assert!(registry.lookup("nope").is_none());
        assert!(registry.contains("time"));
        assert!(!registry.contains("Time")); // lookups are case-sensitive
    }

    #[test]
    fn test_methods_are_sorted() {
        let registry = MethodRegistry::builder()
            .register("zeta", from_fn(|_| async { Ok(serde_json::Value::Null) }))
            .register("alpha", from_fn(|_| async { Ok(serde_json::Value::Null) }))
            .build();

        assert_eq!(registry.methods(), vec!["alpha", "zeta"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_duplicate_registration_replaces() {
        let registry = MethodRegistry::builder()
            .register("m", from_fn(|_| async { Ok(serde_json::json!(1)) }))
            .register("m", from_fn(|_| async { Ok(serde_json::json!(2)) }))
            .build();

        assert_eq!(registry.len(), 1);
    }
}
