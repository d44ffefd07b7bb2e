//! Shared registry of resolved agent identities.

use std::sync::Arc;

use dashmap::DashSet;

/// The user ids of every running agent.
///
/// Each worker registers its own resolved id once during init and reads the
/// set on every poll, so no agent ever replies to itself or to a sibling.
/// Append-only; cloning shares the underlying set.
#[derive(Debug, Clone, Default)]
pub struct IdentityRegistry {
    inner: Arc<DashSet<String>>,
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, user_id: impl Into<String>) {
        self.inner.insert(user_id.into());
    }

    pub fn contains(&self, user_id: &str) -> bool {
        self.inner.contains(user_id)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_contains() {
        let registry = IdentityRegistry::new();
        assert!(registry.is_empty());

        registry.register("123");
        registry.register("456");
        assert!(registry.contains("123"));
        assert!(registry.contains("456"));
        assert!(!registry.contains("789"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_clones_share_the_set() {
        let registry = IdentityRegistry::new();
        let sibling_view = registry.clone();

        registry.register("123");
        assert!(sibling_view.contains("123"));
    }
}
