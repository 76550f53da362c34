//! Handler catalog: the identifier → constructor map.
//!
//! Descriptors name handlers by string. The catalog is the explicit,
//! startup-time registration that gives those strings meaning, instead of
//! looking types up by name at runtime.

use ordo_core::{
    BoxError, CatalogError, HandlerFactory, InstantiationError, LifecycleHandler, Record,
};
use std::{
    collections::HashMap,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};

type Constructor<R> =
    Arc<dyn Fn() -> Result<Box<dyn LifecycleHandler<R>>, BoxError> + Send + Sync>;

/// An immutable, thread-safe map from handler identifiers to constructors.
///
/// Created by calling [`HandlerCatalogBuilder::build`]. Every call to
/// [`instantiate`](HandlerFactory::instantiate) runs the constructor again,
/// so each invocation gets a fresh handler.
///
/// # Example
///
/// ```rust,ignore
/// let catalog = HandlerCatalog::builder()
///     .register_default::<AccountOwnerSync>("AccountOwnerSync")
///     .register("AccountAudit", || AccountAudit::new(audit_sink.clone()))
///     .build()?;
/// ```
pub struct HandlerCatalog<R: Record> {
    constructors: HashMap<String, Constructor<R>>,
}

impl<R: Record> HandlerCatalog<R> {
    /// Start building a catalog.
    pub fn builder() -> HandlerCatalogBuilder<R> {
        HandlerCatalogBuilder::new()
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    /// Registered identifiers, sorted.
    pub fn handler_ids(&self) -> Vec<&str> {
        let mut ids: Vec<_> = self.constructors.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl<R: Record> HandlerFactory<R> for HandlerCatalog<R> {
    fn instantiate(
        &self,
        handler_id: &str,
    ) -> Result<Box<dyn LifecycleHandler<R>>, InstantiationError> {
        let constructor = self
            .constructors
            .get(handler_id)
            .ok_or_else(|| InstantiationError::UnknownHandler(handler_id.to_string()))?;

        match panic::catch_unwind(AssertUnwindSafe(|| (**constructor)())) {
            Ok(Ok(handler)) => Ok(handler),
            Ok(Err(source)) => Err(InstantiationError::Construction {
                handler_id: handler_id.to_string(),
                source,
            }),
            Err(payload) => Err(InstantiationError::Panicked {
                handler_id: handler_id.to_string(),
                message: panic_message(payload.as_ref()),
            }),
        }
    }

    fn contains(&self, handler_id: &str) -> bool {
        self.constructors.contains_key(handler_id)
    }
}

impl<R: Record> std::fmt::Debug for HandlerCatalog<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerCatalog")
            .field("handler_ids", &self.handler_ids())
            .finish()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Builder for constructing a [`HandlerCatalog`].
pub struct HandlerCatalogBuilder<R: Record> {
    entries: Vec<(String, Constructor<R>)>,
}

impl<R: Record> Default for HandlerCatalogBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> HandlerCatalogBuilder<R> {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a handler built with `Default`.
    pub fn register_default<H>(self, handler_id: impl Into<String>) -> Self
    where
        H: LifecycleHandler<R> + Default + 'static,
    {
        self.register(handler_id, H::default)
    }

    /// Register an infallible constructor.
    pub fn register<H, F>(self, handler_id: impl Into<String>, constructor: F) -> Self
    where
        H: LifecycleHandler<R> + 'static,
        F: Fn() -> H + Send + Sync + 'static,
    {
        self.register_fallible(handler_id, move || Ok(constructor()))
    }

    /// Register a constructor that can fail.
    pub fn register_fallible<H, F>(mut self, handler_id: impl Into<String>, constructor: F) -> Self
    where
        H: LifecycleHandler<R> + 'static,
        F: Fn() -> Result<H, BoxError> + Send + Sync + 'static,
    {
        let constructor: Constructor<R> = Arc::new(move || {
            constructor().map(|handler| Box::new(handler) as Box<dyn LifecycleHandler<R>>)
        });
        self.entries.push((handler_id.into(), constructor));
        self
    }

    /// Get the number of registered handlers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the builder has no handlers.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build the immutable catalog.
    ///
    /// Fails if an identifier was registered twice.
    pub fn build(self) -> Result<HandlerCatalog<R>, CatalogError> {
        let mut constructors = HashMap::with_capacity(self.entries.len());
        for (handler_id, constructor) in self.entries {
            if constructors.contains_key(&handler_id) {
                return Err(CatalogError::Duplicate(handler_id));
            }
            constructors.insert(handler_id, constructor);
        }
        Ok(HandlerCatalog { constructors })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestRecord;

    #[derive(Default)]
    struct Noop;
    impl LifecycleHandler<TestRecord> for Noop {}

    fn catalog() -> HandlerCatalog<TestRecord> {
        HandlerCatalog::builder()
            .register_default::<Noop>("Noop")
            .register_fallible("Broken", || -> Result<Noop, BoxError> {
                Err("missing configuration".into())
            })
            .register("Panics", || -> Noop { panic!("constructor exploded") })
            .build()
            .unwrap()
    }

    #[test]
    fn test_instantiate_known_handler() {
        let catalog = catalog();
        assert!(catalog.contains("Noop"));
        assert!(catalog.instantiate("Noop").is_ok());
    }

    #[test]
    fn test_unknown_handler() {
        let err = catalog().instantiate("Ghost").err().unwrap();
        assert!(matches!(err, InstantiationError::UnknownHandler(ref id) if id == "Ghost"));
    }

    #[test]
    fn test_construction_error() {
        let err = catalog().instantiate("Broken").err().unwrap();
        assert!(matches!(err, InstantiationError::Construction { .. }));
        assert_eq!(err.handler_id(), "Broken");
    }

    #[test]
    fn test_construction_panic_is_caught() {
        let err = catalog().instantiate("Panics").err().unwrap();
        match err {
            InstantiationError::Panicked { message, .. } => {
                assert_eq!(message, "constructor exploded")
            }
            other => panic!("Expected Panicked, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let result = HandlerCatalog::<TestRecord>::builder()
            .register_default::<Noop>("Noop")
            .register_default::<Noop>("Noop")
            .build();
        assert_eq!(result.err(), Some(CatalogError::Duplicate("Noop".into())));
    }

    #[test]
    fn test_each_instantiation_is_fresh() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let built = Arc::new(AtomicUsize::new(0));
        let counter = built.clone();
        let catalog = HandlerCatalog::<TestRecord>::builder()
            .register("Counted", move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Noop
            })
            .build()
            .unwrap();

        catalog.instantiate("Counted").ok();
        catalog.instantiate("Counted").ok();
        assert_eq!(built.load(Ordering::SeqCst), 2);
        assert_eq!(catalog.handler_ids(), ["Counted"]);
    }
}
