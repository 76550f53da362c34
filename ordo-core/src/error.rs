//! Error types for Ordo.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`DispatchError`] - Fatal errors of a dispatch run
//! - [`RegistryError`] - Errors reading descriptors from the store
//! - [`InstantiationError`] - Per-handler creation failures (recoverable)
//! - [`CatalogError`] - Errors building a handler catalog

use crate::phase::LifecyclePhase;
use std::time::Duration;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that abort a dispatch run.
///
/// An ineligible run is not an error; it is reported through the dispatch
/// report instead.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The registry could not enumerate handlers. No handler was executed.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// The invocation carried neither new nor old records.
    #[error("no records in {phase} context, cannot determine entity type")]
    EmptyContext {
        /// Phase of the rejected invocation.
        phase: LifecyclePhase,
    },

    /// A dispatched handler returned an error from its callback.
    #[error("handler `{handler_id}` failed during {phase}")]
    Handler {
        /// Identifier of the failing handler.
        handler_id: String,
        /// Phase that was being dispatched.
        phase: LifecyclePhase,
        /// The handler's own error.
        #[source]
        source: BoxError,
    },

    /// A dispatched handler exceeded the configured callback timeout.
    #[error("handler `{handler_id}` timed out after {duration:?}")]
    Timeout {
        /// Identifier of the handler that timed out.
        handler_id: String,
        /// The configured limit.
        duration: Duration,
    },
}

/// Errors raised while resolving descriptors.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The underlying store failed.
    #[error("descriptor store unavailable while resolving `{entity_type}`")]
    Unavailable {
        /// Entity type that was being resolved.
        entity_type: String,
        /// The store's error.
        #[source]
        source: BoxError,
    },
}

/// Errors that can occur while turning a handler identifier into an instance.
///
/// The dispatcher treats every variant as "skip this handler".
#[derive(Error, Debug)]
pub enum InstantiationError {
    /// No constructor is registered under this identifier.
    #[error("unknown handler `{0}`")]
    UnknownHandler(String),

    /// The constructor returned an error.
    #[error("failed to construct handler `{handler_id}`")]
    Construction {
        /// Identifier of the handler.
        handler_id: String,
        /// The constructor's error.
        #[source]
        source: BoxError,
    },

    /// The constructor panicked.
    #[error("handler `{handler_id}` panicked during construction: {message}")]
    Panicked {
        /// Identifier of the handler.
        handler_id: String,
        /// The panic payload, when it was a string.
        message: String,
    },
}

impl InstantiationError {
    /// Identifier of the handler that could not be created.
    pub fn handler_id(&self) -> &str {
        match self {
            InstantiationError::UnknownHandler(id) => id,
            InstantiationError::Construction { handler_id, .. }
            | InstantiationError::Panicked { handler_id, .. } => handler_id,
        }
    }
}

/// Errors that can occur while building a handler catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Two constructors were registered under the same identifier.
    #[error("handler `{0}` is already registered")]
    Duplicate(String),
}

/// Error returned when a string is not a lifecycle phase name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown lifecycle phase: {0}")]
pub struct ParsePhaseError(pub String);
