//! Ordered handler resolution.

use ordo_core::{DescriptorQuery, DescriptorStore, HandlerDescriptor, RegistryError};

/// Resolves the ordered list of handlers that apply to an invocation.
///
/// The registry reads from a [`DescriptorStore`] and guarantees, whatever the
/// store returns, that the result:
///
/// - only contains enabled descriptors of the requested entity type
/// - never contains a descriptor disabled for the invoking principal
/// - is sorted ascending by `execution_order`, ties kept in store order
///
/// # Example
///
/// ```rust,ignore
/// let registry = HandlerRegistry::new(MemoryStore::from_descriptors(descriptors));
/// let handlers = registry.resolve("Account", "alice@example.com").await?;
/// ```
#[derive(Debug)]
pub struct HandlerRegistry<S> {
    store: S,
}

impl<S: DescriptorStore> HandlerRegistry<S> {
    /// Create a registry over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a reference to the store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolve the handlers for `entity_type` on behalf of `principal`.
    ///
    /// An entity type without configured handlers resolves to an empty list.
    /// A failing store is reported as [`RegistryError::Unavailable`].
    pub async fn resolve(
        &self,
        entity_type: &str,
        principal: &str,
    ) -> Result<Vec<HandlerDescriptor>, RegistryError> {
        let query = DescriptorQuery::new(entity_type).excluding(principal);

        let mut descriptors =
            self.store
                .find(&query)
                .await
                .map_err(|source| RegistryError::Unavailable {
                    entity_type: entity_type.to_string(),
                    source,
                })?;

        descriptors.retain(|d| query.matches(d));
        // Stable: equal orders keep the store's order.
        descriptors.sort_by_key(|d| d.execution_order);

        Ok(descriptors)
    }
}
