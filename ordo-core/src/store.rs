//! Descriptor store contract.

use crate::{descriptor::HandlerDescriptor, error::BoxError};
use std::future::Future;

/// The query the registry sends to a [`DescriptorStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptorQuery<'a> {
    /// Entity type to match.
    pub entity_type: &'a str,
    /// Only return enabled descriptors.
    pub enabled_only: bool,
    /// Exclude descriptors disabled for this principal.
    pub exclude_principal: Option<&'a str>,
}

impl<'a> DescriptorQuery<'a> {
    /// Query every enabled descriptor of `entity_type`.
    pub fn new(entity_type: &'a str) -> Self {
        Self {
            entity_type,
            enabled_only: true,
            exclude_principal: None,
        }
    }

    /// Also exclude descriptors disabled for `principal`.
    pub fn excluding(mut self, principal: &'a str) -> Self {
        self.exclude_principal = Some(principal);
        self
    }

    /// Include disabled descriptors too.
    pub fn including_disabled(mut self) -> Self {
        self.enabled_only = false;
        self
    }

    /// Whether `descriptor` satisfies this query.
    pub fn matches(&self, descriptor: &HandlerDescriptor) -> bool {
        descriptor.entity_type == self.entity_type
            && (!self.enabled_only || descriptor.enabled)
            && self
                .exclude_principal
                .is_none_or(|principal| !descriptor.is_disabled_for(principal))
    }
}

/// The persistent home of handler descriptors.
///
/// Stores return candidates in their natural order (for most stores, the
/// order in which descriptors were inserted). They may apply the query's
/// filters themselves; the registry re-checks them either way.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a descriptor store",
    label = "missing `DescriptorStore` implementation",
    note = "Implement `find` to read descriptors from your persistence layer."
)]
pub trait DescriptorStore: Send + Sync {
    /// Read the descriptors matching `query`.
    fn find(
        &self,
        query: &DescriptorQuery<'_>,
    ) -> impl Future<Output = Result<Vec<HandlerDescriptor>, BoxError>> + Send;
}

impl<S: DescriptorStore> DescriptorStore for std::sync::Arc<S> {
    fn find(
        &self,
        query: &DescriptorQuery<'_>,
    ) -> impl Future<Output = Result<Vec<HandlerDescriptor>, BoxError>> + Send {
        (**self).find(query)
    }
}
