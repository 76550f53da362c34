//! Record trait for entity data.

use std::sync::Arc;

/// A data record belonging to some entity type.
///
/// The entity type is what descriptors are bound to; the dispatcher reads it
/// from the first record of an invocation.
///
/// # Example
///
/// ```rust,ignore
/// struct Account { name: String }
///
/// impl Record for Account {
///     fn entity_type(&self) -> &str { "Account" }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Record",
    label = "missing `Record` implementation",
    note = "Records must name their entity type and be `Send + Sync + 'static`."
)]
pub trait Record: Send + Sync + 'static {
    /// The entity type this record belongs to (e.g. a table name).
    fn entity_type(&self) -> &str;
}

impl<T: Record + ?Sized> Record for Box<T> {
    fn entity_type(&self) -> &str {
        (**self).entity_type()
    }
}

impl<T: Record + ?Sized> Record for Arc<T> {
    fn entity_type(&self) -> &str {
        (**self).entity_type()
    }
}
