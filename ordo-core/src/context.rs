//! # Invocation Context
//!
//! Everything a dispatch run needs to know about the event that triggered
//! it, passed explicitly instead of read from ambient state:
//!
//! - the [`LifecyclePhase`]
//! - the new (after) record set, absent for deletions
//! - the old (before) record set, absent for insertions
//! - the principal the invocation runs on behalf of
//! - the [`RunGuard`] of the invocation chain
//!
//! # Nested Invocations
//!
//! A handler that mutates entities may cause another invocation. Build that
//! invocation with [`TriggerContext::child`] so it shares the parent's guard
//! and principal:
//!
//! ```rust,ignore
//! let mut nested = ctx.child(LifecyclePhase::AfterUpdate)
//!     .new_records(updated)
//!     .build();
//! dispatcher.run(&mut nested).await?;
//! ```

use crate::{
    guard::{LoopGuard, RunGuard},
    phase::LifecyclePhase,
    record::Record,
};
use std::sync::Arc;

/// The explicit context of a single lifecycle invocation.
pub struct TriggerContext<R> {
    phase: LifecyclePhase,
    new_records: Option<Vec<R>>,
    old_records: Option<Vec<R>>,
    principal: String,
    guard: Arc<dyn RunGuard>,
}

impl<R: Record> TriggerContext<R> {
    /// Start building a context for `phase`.
    pub fn builder(phase: LifecyclePhase) -> TriggerContextBuilder<R> {
        TriggerContextBuilder::new(phase)
    }

    /// Start building a nested context in the same invocation chain.
    pub fn child(&self, phase: LifecyclePhase) -> TriggerContextBuilder<R> {
        TriggerContextBuilder::new(phase)
            .principal(self.principal.clone())
            .shared_guard(Arc::clone(&self.guard))
    }

    /// The lifecycle phase being dispatched.
    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    /// The new (after) record set, if the phase carries one.
    pub fn new_records(&self) -> Option<&[R]> {
        self.new_records.as_deref()
    }

    /// Mutable access to the new record set.
    ///
    /// Changes made here are visible to every handler that runs later in
    /// the same dispatch.
    pub fn new_records_mut(&mut self) -> Option<&mut [R]> {
        self.new_records.as_deref_mut()
    }

    /// The old (before) record set, if the phase carries one.
    pub fn old_records(&self) -> Option<&[R]> {
        self.old_records.as_deref()
    }

    /// The principal this invocation runs on behalf of.
    pub fn principal(&self) -> &str {
        &self.principal
    }

    /// The guard of this invocation chain.
    pub fn guard(&self) -> &Arc<dyn RunGuard> {
        &self.guard
    }

    /// The entity type of this invocation.
    ///
    /// Taken from the first new record; falls back to the first old record
    /// when the new set is absent or empty (deletions have no new set).
    pub fn entity_type(&self) -> Option<&str> {
        let first_new = self.new_records.as_ref().and_then(|records| records.first());
        let first_old = self.old_records.as_ref().and_then(|records| records.first());
        first_new.or(first_old).map(Record::entity_type)
    }

    /// Take back ownership of the record sets.
    pub fn into_records(self) -> (Option<Vec<R>>, Option<Vec<R>>) {
        (self.new_records, self.old_records)
    }
}

impl<R> std::fmt::Debug for TriggerContext<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriggerContext")
            .field("phase", &self.phase)
            .field("new_records", &self.new_records.as_ref().map(Vec::len))
            .field("old_records", &self.old_records.as_ref().map(Vec::len))
            .field("principal", &self.principal)
            .finish_non_exhaustive()
    }
}

/// Builder for [`TriggerContext`].
pub struct TriggerContextBuilder<R> {
    phase: LifecyclePhase,
    new_records: Option<Vec<R>>,
    old_records: Option<Vec<R>>,
    principal: String,
    guard: Option<Arc<dyn RunGuard>>,
}

impl<R: Record> TriggerContextBuilder<R> {
    /// Create a builder with no records, an empty principal and no guard.
    pub fn new(phase: LifecyclePhase) -> Self {
        Self {
            phase,
            new_records: None,
            old_records: None,
            principal: String::new(),
            guard: None,
        }
    }

    /// Set the new (after) record set.
    pub fn new_records(mut self, records: Vec<R>) -> Self {
        self.new_records = Some(records);
        self
    }

    /// Set the old (before) record set.
    pub fn old_records(mut self, records: Vec<R>) -> Self {
        self.old_records = Some(records);
        self
    }

    /// Set the invoking principal.
    pub fn principal(mut self, principal: impl Into<String>) -> Self {
        self.principal = principal.into();
        self
    }

    /// Use `guard` for this invocation chain.
    pub fn guard<G: RunGuard + 'static>(self, guard: G) -> Self {
        self.shared_guard(Arc::new(guard))
    }

    /// Use an already shared guard.
    pub fn shared_guard(mut self, guard: Arc<dyn RunGuard>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Build the context.
    ///
    /// Without an explicit guard, the context starts a new, unbounded chain.
    pub fn build(self) -> TriggerContext<R> {
        TriggerContext {
            phase: self.phase,
            new_records: self.new_records,
            old_records: self.old_records,
            principal: self.principal,
            guard: self
                .guard
                .unwrap_or_else(|| Arc::new(LoopGuard::unbounded())),
        }
    }
}
