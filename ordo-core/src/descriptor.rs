//! Handler descriptors.
//!
//! A descriptor is the data that binds a handler to an entity type. It is
//! created and changed by administrative configuration; the dispatch path
//! only ever reads owned copies of it.

use std::collections::BTreeSet;

/// A configuration record describing one handler binding.
///
/// # Example
///
/// ```rust,ignore
/// let descriptor = HandlerDescriptor::new("Account", "AccountOwnerSync")
///     .with_order(10)
///     .disabled_for("integration@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandlerDescriptor {
    /// Entity type the handler is bound to.
    pub entity_type: String,
    /// Ascending execution order among handlers of the same entity type.
    #[cfg_attr(feature = "serde", serde(default))]
    pub execution_order: i32,
    /// Lookup key of the handler in a [`HandlerFactory`](crate::HandlerFactory).
    pub handler_id: String,
    /// Disabled descriptors are never resolved.
    #[cfg_attr(feature = "serde", serde(default = "enabled_by_default"))]
    pub enabled: bool,
    /// Principals for whom this descriptor is switched off.
    #[cfg_attr(feature = "serde", serde(default))]
    pub disabled_for: BTreeSet<String>,
}

#[cfg(feature = "serde")]
fn enabled_by_default() -> bool {
    true
}

impl HandlerDescriptor {
    /// Create an enabled descriptor with execution order 0.
    pub fn new(entity_type: impl Into<String>, handler_id: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            execution_order: 0,
            handler_id: handler_id.into(),
            enabled: true,
            disabled_for: BTreeSet::new(),
        }
    }

    /// Set the execution order.
    pub fn with_order(mut self, execution_order: i32) -> Self {
        self.execution_order = execution_order;
        self
    }

    /// Set the enabled flag.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Switch this descriptor off for one principal.
    pub fn disabled_for(mut self, principal: impl Into<String>) -> Self {
        self.disabled_for.insert(principal.into());
        self
    }

    /// Whether the descriptor is switched off for `principal`.
    ///
    /// Principals are compared exactly.
    pub fn is_disabled_for(&self, principal: &str) -> bool {
        self.disabled_for.contains(principal)
    }

    /// Whether this descriptor should run for `entity_type` on behalf of `principal`.
    pub fn applies_to(&self, entity_type: &str, principal: &str) -> bool {
        self.enabled && self.entity_type == entity_type && !self.is_disabled_for(principal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_descriptor_defaults() {
        let d = HandlerDescriptor::new("Account", "AccountHandler");
        assert!(d.enabled);
        assert_eq!(d.execution_order, 0);
        assert!(d.disabled_for.is_empty());
    }

    #[test]
    fn test_applies_to() {
        let d = HandlerDescriptor::new("Account", "AccountHandler")
            .with_order(5)
            .disabled_for("ops@example.com");

        assert!(d.applies_to("Account", "alice@example.com"));
        assert!(!d.applies_to("Account", "ops@example.com"));
        assert!(!d.applies_to("Contact", "alice@example.com"));
        assert!(!d.clone().with_enabled(false).applies_to("Account", "alice@example.com"));
    }

    #[test]
    fn test_principal_match_is_exact() {
        let d = HandlerDescriptor::new("Account", "AccountHandler").disabled_for("Ops@Example.com");
        assert!(d.is_disabled_for("Ops@Example.com"));
        assert!(!d.is_disabled_for("ops@example.com"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_defaults() {
        let d: HandlerDescriptor =
            serde_json::from_str(r#"{"entity_type":"Account","handler_id":"A"}"#).unwrap();
        assert!(d.enabled);
        assert_eq!(d.execution_order, 0);
    }
}
