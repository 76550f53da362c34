//! # ordo-core
//!
//! Core contracts for the Ordo metadata-driven lifecycle dispatcher.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! handler crates and store adapters that don't need the full `ordo-std`
//! implementation.
//!
//! # Moving Parts
//!
//! Ordo decides *which* handlers run for an entity, and in *what order*, from
//! data rather than from code. The contracts below are the seams between that
//! decision and the outside world.
//!
//! ## Descriptors ([`HandlerDescriptor`])
//!
//! A configuration record naming a handler, the entity type it is bound to,
//! its execution order, whether it is enabled, and the principals for whom it
//! is switched off.
//!
//! ## Store ([`DescriptorStore`])
//!
//! The persistent home of descriptors. Ordo only ever reads from it, through
//! a [`DescriptorQuery`].
//!
//! ## Handlers ([`LifecycleHandler`], [`HandlerFactory`])
//!
//! Handlers implement any subset of the seven lifecycle callbacks. A factory
//! turns the identifier stored in a descriptor into a fresh handler instance.
//!
//! ## Invocation ([`TriggerContext`], [`RunGuard`])
//!
//! The explicit context of a single invocation: lifecycle phase, record sets,
//! principal, and the loop guard shared by the whole invocation chain.
//!
//! # Error Types
//!
//! - [`DispatchError`] - Top-level error of a dispatch run
//! - [`RegistryError`] - The descriptor store could not be read
//! - [`InstantiationError`] - A single handler could not be created

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod context;
mod descriptor;
mod error;
mod factory;
mod guard;
mod handler;
mod phase;
mod record;
mod store;

// Re-exports
pub use async_trait::async_trait;
pub use context::{TriggerContext, TriggerContextBuilder};
pub use descriptor::HandlerDescriptor;
pub use error::{
    BoxError, CatalogError, DispatchError, InstantiationError, ParsePhaseError, RegistryError,
};
pub use factory::HandlerFactory;
pub use guard::{LoopGuard, RunGuard};
pub use handler::{HandlerResult, LifecycleHandler, dispatch_phase};
pub use phase::LifecyclePhase;
pub use record::Record;
pub use store::{DescriptorQuery, DescriptorStore};
