//! The metadata dispatcher.
//!
//! A run goes through fixed states, once, in order:
//!
//! 1. **Validating**: the chain's [`RunGuard`](ordo_core::RunGuard) decides
//!    whether the run may proceed. An ineligible run returns immediately.
//! 2. **Resolving**: the [`HandlerRegistry`] produces the ordered descriptors
//!    for the invocation's entity type and principal.
//! 3. **Dispatching**: each descriptor's handler is instantiated and driven
//!    through the callback of the current phase, one at a time.
//! 4. **Done**: the [`DispatchReport`] lists what ran and what was skipped.

mod config;
mod report;
mod timeout;

pub use config::DispatchConfig;
pub use report::{DispatchReport, RunOutcome, SkippedHandler};

use crate::registry::HandlerRegistry;
use ordo_core::{
    DescriptorStore, DispatchError, HandlerFactory, Record, TriggerContext, dispatch_phase,
};
use tracing::Instrument;

/// Drives the configured handlers of an entity through one lifecycle phase.
///
/// The dispatcher holds no per-invocation state; it can be shared freely
/// (e.g. in an `Arc`) and used for any number of concurrent invocations.
/// Everything that belongs to one invocation chain lives in the
/// [`TriggerContext`].
///
/// # Example
///
/// ```rust,ignore
/// let dispatcher = MetadataDispatcher::new(
///     HandlerRegistry::new(MemoryStore::from_descriptors(descriptors)),
///     catalog,
/// );
///
/// let mut ctx = TriggerContext::builder(LifecyclePhase::AfterUpdate)
///     .new_records(updated)
///     .old_records(previous)
///     .principal("alice@example.com")
///     .build();
///
/// let report = dispatcher.run(&mut ctx).await?;
/// ```
#[derive(Debug)]
pub struct MetadataDispatcher<S, F> {
    registry: HandlerRegistry<S>,
    factory: F,
    config: DispatchConfig,
}

impl<S, F> MetadataDispatcher<S, F>
where
    S: DescriptorStore,
{
    /// Create a dispatcher with the default configuration.
    pub fn new(registry: HandlerRegistry<S>, factory: F) -> Self {
        Self::with_config(registry, factory, DispatchConfig::default())
    }

    /// Create a dispatcher with an explicit configuration.
    pub fn with_config(registry: HandlerRegistry<S>, factory: F, config: DispatchConfig) -> Self {
        Self {
            registry,
            factory,
            config,
        }
    }

    /// Get a reference to the registry.
    pub fn registry(&self) -> &HandlerRegistry<S> {
        &self.registry
    }

    /// Get a reference to the handler factory.
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Dispatch the phase of `ctx` to every configured handler, in order.
    ///
    /// Handlers that cannot be instantiated are skipped and listed in the
    /// report. A registry failure aborts the run before any handler executes;
    /// a handler's own error aborts the run at that handler.
    pub async fn run<R>(&self, ctx: &mut TriggerContext<R>) -> Result<DispatchReport, DispatchError>
    where
        R: Record,
        F: HandlerFactory<R>,
    {
        let span = tracing::info_span!(
            "dispatch",
            phase = %ctx.phase(),
            principal = %ctx.principal(),
            entity_type = tracing::field::Empty,
        );
        self.run_inner(ctx).instrument(span).await
    }

    /// Blocking variant of [`run`](Self::run) for synchronous callers.
    ///
    /// Handler timeouts are not enforced here, since they need a Tokio runtime.
    pub fn run_blocking<R>(
        &self,
        ctx: &mut TriggerContext<R>,
    ) -> Result<DispatchReport, DispatchError>
    where
        R: Record,
        F: HandlerFactory<R>,
    {
        futures::executor::block_on(self.run(ctx))
    }

    async fn run_inner<R>(
        &self,
        ctx: &mut TriggerContext<R>,
    ) -> Result<DispatchReport, DispatchError>
    where
        R: Record,
        F: HandlerFactory<R>,
    {
        let phase = ctx.phase();

        if !ctx.guard().is_eligible() {
            tracing::debug!("run not eligible, nothing dispatched");
            return Ok(DispatchReport::ineligible(phase));
        }
        ctx.guard().enter();

        let entity_type = ctx
            .entity_type()
            .ok_or(DispatchError::EmptyContext { phase })?
            .to_string();
        tracing::Span::current().record("entity_type", entity_type.as_str());

        let descriptors = self
            .registry
            .resolve(&entity_type, ctx.principal())
            .await?;
        tracing::debug!(handlers = descriptors.len(), "resolved handlers");

        let mut report = DispatchReport::started(phase, &entity_type);
        for descriptor in descriptors {
            let mut handler = match self.factory.instantiate(&descriptor.handler_id) {
                Ok(handler) => handler,
                Err(reason) => {
                    tracing::warn!(
                        handler_id = %descriptor.handler_id,
                        execution_order = descriptor.execution_order,
                        error = %reason,
                        "skipping handler that could not be instantiated"
                    );
                    report.skipped.push(SkippedHandler { descriptor, reason });
                    continue;
                }
            };

            tracing::trace!(handler_id = %descriptor.handler_id, "dispatching handler");
            timeout::call_handler(
                &descriptor.handler_id,
                phase,
                self.config.handler_timeout(),
                dispatch_phase(handler.as_mut(), ctx),
            )
            .await?;
            report.executed.push(descriptor.handler_id);
        }

        tracing::debug!(
            executed = report.executed.len(),
            skipped = report.skipped.len(),
            "dispatch completed"
        );
        Ok(report)
    }
}
