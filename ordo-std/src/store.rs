//! In-memory descriptor store.

use ordo_core::{BoxError, DescriptorQuery, DescriptorStore, HandlerDescriptor};
use std::sync::{PoisonError, RwLock};

/// A [`DescriptorStore`] that keeps descriptors in memory, in insertion order.
///
/// The administrative methods (`insert`, `set_enabled`, ...) stand in for
/// whatever tooling maintains descriptors in a real deployment. The dispatch
/// path only ever calls [`find`](DescriptorStore::find).
#[derive(Debug, Default)]
pub struct MemoryStore {
    descriptors: RwLock<Vec<HandlerDescriptor>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `descriptors`, in the given order.
    pub fn from_descriptors(descriptors: impl IntoIterator<Item = HandlerDescriptor>) -> Self {
        Self {
            descriptors: RwLock::new(descriptors.into_iter().collect()),
        }
    }

    /// Load descriptors from a JSON array.
    ///
    /// ```json
    /// [
    ///   { "entity_type": "Account", "handler_id": "AccountOwnerSync", "execution_order": 10 },
    ///   { "entity_type": "Account", "handler_id": "AccountAudit", "disabled_for": ["etl@example.com"] }
    /// ]
    /// ```
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let descriptors: Vec<HandlerDescriptor> = serde_json::from_str(json)?;
        Ok(Self::from_descriptors(descriptors))
    }

    /// Append a descriptor.
    pub fn insert(&self, descriptor: HandlerDescriptor) {
        self.write().push(descriptor);
    }

    /// Append several descriptors, keeping their order.
    pub fn extend(&self, descriptors: impl IntoIterator<Item = HandlerDescriptor>) {
        self.write().extend(descriptors);
    }

    /// Set the enabled flag of every descriptor binding `handler_id` to
    /// `entity_type`. Returns how many descriptors changed.
    pub fn set_enabled(&self, entity_type: &str, handler_id: &str, enabled: bool) -> usize {
        self.update(entity_type, handler_id, |d| d.enabled = enabled)
    }

    /// Switch a binding off for `principal`.
    pub fn disable_for(&self, entity_type: &str, handler_id: &str, principal: &str) -> usize {
        self.update(entity_type, handler_id, |d| {
            d.disabled_for.insert(principal.to_string());
        })
    }

    /// Switch a binding back on for `principal`.
    pub fn enable_for(&self, entity_type: &str, handler_id: &str, principal: &str) -> usize {
        self.update(entity_type, handler_id, |d| {
            d.disabled_for.remove(principal);
        })
    }

    /// Remove every descriptor binding `handler_id` to `entity_type`.
    pub fn remove(&self, entity_type: &str, handler_id: &str) -> usize {
        let mut descriptors = self.write();
        let before = descriptors.len();
        descriptors.retain(|d| !(d.entity_type == entity_type && d.handler_id == handler_id));
        before - descriptors.len()
    }

    /// A copy of every stored descriptor, in insertion order.
    pub fn snapshot(&self) -> Vec<HandlerDescriptor> {
        self.read().clone()
    }

    /// Number of stored descriptors.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn update(
        &self,
        entity_type: &str,
        handler_id: &str,
        mut apply: impl FnMut(&mut HandlerDescriptor),
    ) -> usize {
        let mut changed = 0;
        for descriptor in self
            .write()
            .iter_mut()
            .filter(|d| d.entity_type == entity_type && d.handler_id == handler_id)
        {
            apply(descriptor);
            changed += 1;
        }
        changed
    }

    // Descriptors are plain data, so a poisoned lock still holds a usable value.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<HandlerDescriptor>> {
        self.descriptors.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<HandlerDescriptor>> {
        self.descriptors
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl DescriptorStore for MemoryStore {
    async fn find(&self, query: &DescriptorQuery<'_>) -> Result<Vec<HandlerDescriptor>, BoxError> {
        Ok(self
            .read()
            .iter()
            .filter(|d| query.matches(d))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryStore {
        MemoryStore::from_descriptors([
            HandlerDescriptor::new("Account", "A").with_order(20),
            HandlerDescriptor::new("Account", "B").with_order(10),
            HandlerDescriptor::new("Contact", "C"),
        ])
    }

    #[tokio::test]
    async fn test_find_keeps_insertion_order() {
        let found = store().find(&DescriptorQuery::new("Account")).await.unwrap();
        let ids: Vec<_> = found.iter().map(|d| d.handler_id.as_str()).collect();
        assert_eq!(ids, ["A", "B"]);
    }

    #[tokio::test]
    async fn test_admin_updates_are_visible() {
        let store = store();
        assert_eq!(store.set_enabled("Account", "A", false), 1);
        assert_eq!(store.disable_for("Account", "B", "bob"), 1);

        let found = store
            .find(&DescriptorQuery::new("Account").excluding("bob"))
            .await
            .unwrap();
        assert!(found.is_empty());

        assert_eq!(store.enable_for("Account", "B", "bob"), 1);
        let found = store
            .find(&DescriptorQuery::new("Account").excluding("bob"))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_remove() {
        let store = store();
        assert_eq!(store.remove("Account", "A"), 1);
        assert_eq!(store.remove("Account", "A"), 0);
        assert_eq!(store.len(), 2);
        assert!(!store.is_empty());
    }

    #[test]
    fn test_update_unknown_binding_changes_nothing() {
        let store = store();
        assert_eq!(store.set_enabled("Account", "Missing", false), 0);
        assert_eq!(store.snapshot(), self::store().snapshot());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json() {
        let store = MemoryStore::from_json(
            r#"[
                {"entity_type": "Account", "handler_id": "A", "execution_order": 10},
                {"entity_type": "Account", "handler_id": "B", "enabled": false, "disabled_for": ["bob"]}
            ]"#,
        )
        .unwrap();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].execution_order, 10);
        assert!(!snapshot[1].enabled);
        assert!(snapshot[1].is_disabled_for("bob"));
    }
}
