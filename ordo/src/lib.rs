//! # ordo - Metadata-Driven Lifecycle Dispatch
//!
//! `ordo` runs entity lifecycle handlers (before/after insert, update,
//! delete, undelete) whose selection, order and enabled state are **data**,
//! not code. Handlers are bound to entity types through descriptors; a
//! single dispatcher reads those descriptors at invocation time.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ordo::prelude::*;
//!
//! #[derive(Default)]
//! struct StampOwner;
//!
//! #[ordo::async_trait]
//! impl LifecycleHandler<Account> for StampOwner {
//!     async fn before_insert(&mut self, ctx: &mut TriggerContext<Account>) -> HandlerResult {
//!         // ...
//!         Ok(())
//!     }
//! }
//!
//! let catalog = HandlerCatalog::builder()
//!     .register_default::<StampOwner>("StampOwner")
//!     .build()?;
//! let store = MemoryStore::from_descriptors([
//!     HandlerDescriptor::new("Account", "StampOwner").with_order(10),
//! ]);
//! let dispatcher = MetadataDispatcher::new(HandlerRegistry::new(store), catalog);
//!
//! let mut ctx = TriggerContext::builder(LifecyclePhase::BeforeInsert)
//!     .new_records(accounts)
//!     .principal("alice@example.com")
//!     .build();
//! let report = dispatcher.run(&mut ctx).await?;
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use ordo_core::{
    // Errors
    BoxError,
    CatalogError,
    // Descriptors & store
    DescriptorQuery,
    DescriptorStore,
    DispatchError,
    HandlerDescriptor,
    // Handlers
    HandlerFactory,
    HandlerResult,
    InstantiationError,
    LifecycleHandler,
    LifecyclePhase,
    // Guard
    LoopGuard,
    ParsePhaseError,
    Record,
    RegistryError,
    RunGuard,
    // Invocation
    TriggerContext,
    TriggerContextBuilder,
    async_trait,
    dispatch_phase,
};

pub use ordo_std::{
    DispatchConfig, DispatchReport, HandlerCatalog, HandlerCatalogBuilder, HandlerRegistry,
    MemoryStore, MetadataDispatcher, RunOutcome, SkippedHandler,
};

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use ordo_std::testing::*;
}

/// Prelude module - common imports for Ordo.
///
/// # Usage
///
/// ```rust,ignore
/// use ordo::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Errors
        BoxError,
        DispatchError,
        // Dispatch
        DispatchReport,
        // Instantiation
        HandlerCatalog,
        // Descriptors
        HandlerDescriptor,
        HandlerRegistry,
        HandlerResult,
        // Handlers
        LifecycleHandler,
        LifecyclePhase,
        LoopGuard,
        MemoryStore,
        MetadataDispatcher,
        Record,
        TriggerContext,
    };
}
