//! Testing utilities for Ordo.
//!
//! This module provides utilities to make testing handlers, stores, and
//! dispatchers easier.
//!
//! # Features
//!
//! - [`TestRecord`]: A minimal record with a configurable entity type
//! - [`CallLog`]: A shared log of handler callbacks, in call order
//! - [`RecordingHandler`]: A handler that writes every callback to a [`CallLog`]
//! - [`FailingHandler`]: A handler whose callbacks always fail
//! - [`FailingStore`]: A store that is always unavailable
//! - [`CountingStore`]: A store wrapper that counts queries

use ordo_core::{
    BoxError, DescriptorQuery, DescriptorStore, HandlerDescriptor, HandlerResult, LifecyclePhase,
    LifecycleHandler, Record, TriggerContext, async_trait,
};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Test Record
// ============================================================================

/// A record with an explicit entity type and a list of handler marks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRecord {
    /// The entity type reported through [`Record`].
    pub entity_type: String,
    /// Record identifier.
    pub id: u32,
    /// Free-form marks, e.g. appended by handlers under test.
    pub marks: Vec<String>,
}

impl TestRecord {
    /// Create a record of `entity_type` with no marks.
    pub fn new(entity_type: impl Into<String>, id: u32) -> Self {
        Self {
            entity_type: entity_type.into(),
            id,
            marks: Vec::new(),
        }
    }
}

impl Record for TestRecord {
    fn entity_type(&self) -> &str {
        &self.entity_type
    }
}

// ============================================================================
// Call Log
// ============================================================================

/// A shared, cloneable log of `(handler, phase)` callbacks.
///
/// # Example
///
/// ```rust,ignore
/// let log = CallLog::new();
/// let catalog = HandlerCatalog::builder()
///     .register("First", log.handler("First"))
///     .build()?;
///
/// dispatcher.run(&mut ctx).await?;
/// assert_eq!(log.handlers(), ["First"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<(String, LifecyclePhase)>>>,
}

impl CallLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a callback.
    pub fn push(&self, handler: &str, phase: LifecyclePhase) {
        self.calls
            .lock()
            .unwrap()
            .push((handler.to_string(), phase));
    }

    /// All recorded callbacks, in call order.
    pub fn calls(&self) -> Vec<(String, LifecyclePhase)> {
        self.calls.lock().unwrap().clone()
    }

    /// The handler names of all recorded callbacks, in call order.
    pub fn handlers(&self) -> Vec<String> {
        self.calls().into_iter().map(|(name, _)| name).collect()
    }

    /// Number of recorded callbacks.
    pub fn len(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear the log.
    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// A constructor for a [`RecordingHandler`] named `name` writing to this log.
    pub fn handler(&self, name: &'static str) -> impl Fn() -> RecordingHandler + Send + Sync + 'static {
        let log = self.clone();
        move || RecordingHandler::new(name, log.clone())
    }
}

// ============================================================================
// Recording Handler
// ============================================================================

/// A handler that records every callback in a [`CallLog`] and marks each
/// new record with its name.
pub struct RecordingHandler {
    name: &'static str,
    log: CallLog,
}

impl RecordingHandler {
    /// Create a recording handler.
    pub fn new(name: &'static str, log: CallLog) -> Self {
        Self { name, log }
    }

    fn record(&self, ctx: &mut TriggerContext<TestRecord>) -> HandlerResult {
        self.log.push(self.name, ctx.phase());
        for record in ctx.new_records_mut().into_iter().flatten() {
            record.marks.push(self.name.to_string());
        }
        Ok(())
    }
}

#[async_trait]
impl LifecycleHandler<TestRecord> for RecordingHandler {
    async fn before_insert(&mut self, ctx: &mut TriggerContext<TestRecord>) -> HandlerResult {
        self.record(ctx)
    }

    async fn before_update(&mut self, ctx: &mut TriggerContext<TestRecord>) -> HandlerResult {
        self.record(ctx)
    }

    async fn before_delete(&mut self, ctx: &mut TriggerContext<TestRecord>) -> HandlerResult {
        self.record(ctx)
    }

    async fn after_insert(&mut self, ctx: &mut TriggerContext<TestRecord>) -> HandlerResult {
        self.record(ctx)
    }

    async fn after_update(&mut self, ctx: &mut TriggerContext<TestRecord>) -> HandlerResult {
        self.record(ctx)
    }

    async fn after_delete(&mut self, ctx: &mut TriggerContext<TestRecord>) -> HandlerResult {
        self.record(ctx)
    }

    async fn after_undelete(&mut self, ctx: &mut TriggerContext<TestRecord>) -> HandlerResult {
        self.record(ctx)
    }
}

// ============================================================================
// Failing Handler
// ============================================================================

/// A handler whose callbacks all return an error with the given message.
#[derive(Debug, Clone)]
pub struct FailingHandler {
    message: String,
}

impl FailingHandler {
    /// Create a failing handler.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn fail(&self) -> HandlerResult {
        Err(self.message.clone().into())
    }
}

#[async_trait]
impl<R: Record> LifecycleHandler<R> for FailingHandler {
    async fn before_insert(&mut self, _ctx: &mut TriggerContext<R>) -> HandlerResult {
        self.fail()
    }

    async fn before_update(&mut self, _ctx: &mut TriggerContext<R>) -> HandlerResult {
        self.fail()
    }

    async fn before_delete(&mut self, _ctx: &mut TriggerContext<R>) -> HandlerResult {
        self.fail()
    }

    async fn after_insert(&mut self, _ctx: &mut TriggerContext<R>) -> HandlerResult {
        self.fail()
    }

    async fn after_update(&mut self, _ctx: &mut TriggerContext<R>) -> HandlerResult {
        self.fail()
    }

    async fn after_delete(&mut self, _ctx: &mut TriggerContext<R>) -> HandlerResult {
        self.fail()
    }

    async fn after_undelete(&mut self, _ctx: &mut TriggerContext<R>) -> HandlerResult {
        self.fail()
    }
}

// ============================================================================
// Stores
// ============================================================================

/// A store whose every query fails with the given message.
#[derive(Debug, Clone)]
pub struct FailingStore {
    message: String,
    calls: Arc<AtomicUsize>,
}

impl FailingStore {
    /// Create a failing store.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of queries received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DescriptorStore for FailingStore {
    async fn find(&self, _query: &DescriptorQuery<'_>) -> Result<Vec<HandlerDescriptor>, BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(self.message.clone().into())
    }
}

/// A store wrapper that counts the queries it forwards.
#[derive(Debug)]
pub struct CountingStore<S> {
    inner: S,
    calls: Arc<AtomicUsize>,
}

impl<S> CountingStore<S> {
    /// Wrap `inner`.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A handle that keeps reporting the count after the store is moved.
    pub fn counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }

    /// Number of queries forwarded so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Get a reference to the wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: DescriptorStore> DescriptorStore for CountingStore<S> {
    async fn find(&self, query: &DescriptorQuery<'_>) -> Result<Vec<HandlerDescriptor>, BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find(query).await
    }
}
