//! Handler factory contract.

use crate::{error::InstantiationError, handler::LifecycleHandler, record::Record};

/// Turns the handler identifier stored in a descriptor into a fresh handler.
///
/// Every call must produce a new instance; the dispatcher never reuses a
/// handler across invocations.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot create handlers for records of type `{R}`",
    label = "missing `HandlerFactory<{R}>` implementation",
    note = "Build a `HandlerCatalog<{R}>` or implement `instantiate` yourself."
)]
pub trait HandlerFactory<R: Record>: Send + Sync {
    /// Create a new handler for `handler_id`.
    fn instantiate(
        &self,
        handler_id: &str,
    ) -> Result<Box<dyn LifecycleHandler<R>>, InstantiationError>;

    /// Whether `handler_id` is known to this factory.
    fn contains(&self, handler_id: &str) -> bool;
}

impl<R: Record, F: HandlerFactory<R> + ?Sized> HandlerFactory<R> for std::sync::Arc<F> {
    fn instantiate(
        &self,
        handler_id: &str,
    ) -> Result<Box<dyn LifecycleHandler<R>>, InstantiationError> {
        (**self).instantiate(handler_id)
    }

    fn contains(&self, handler_id: &str) -> bool {
        (**self).contains(handler_id)
    }
}
