//! # ordo-std
//!
//! Standard implementations for the Ordo metadata-driven lifecycle dispatcher.
//!
//! This crate provides:
//! - **Storage**: [`MemoryStore`], an in-memory [`DescriptorStore`]
//! - **Resolution**: [`HandlerRegistry`], ordered and principal-aware
//! - **Instantiation**: [`HandlerCatalog`], the identifier → constructor map
//! - **Dispatch**: [`MetadataDispatcher`] with its [`DispatchConfig`] and
//!   [`DispatchReport`]
//! - **Testing**: helpers in [`testing`]
//!
//! [`DescriptorStore`]: ordo_core::DescriptorStore

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use ordo_core;

// Modules
pub mod catalog;
pub mod dispatcher;
pub mod registry;
pub mod store;
pub mod testing;

pub use catalog::{HandlerCatalog, HandlerCatalogBuilder};
pub use dispatcher::{DispatchConfig, DispatchReport, MetadataDispatcher, RunOutcome, SkippedHandler};
pub use registry::HandlerRegistry;
pub use store::MemoryStore;
