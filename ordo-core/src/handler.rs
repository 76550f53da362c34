//! # Lifecycle Handlers
//!
//! The fixed interface every configured handler is driven through.
//!
//! A handler implements any subset of the seven callbacks; the rest are
//! no-ops. Most handlers implement exactly one.
//!
//! ```rust,ignore
//! #[derive(Default)]
//! struct NormalizeAccountName;
//!
//! #[async_trait]
//! impl LifecycleHandler<Account> for NormalizeAccountName {
//!     async fn before_insert(&mut self, ctx: &mut TriggerContext<Account>) -> HandlerResult {
//!         for account in ctx.new_records_mut().into_iter().flatten() {
//!             account.name = account.name.trim().to_string();
//!         }
//!         Ok(())
//!     }
//! }
//! ```
//!
//! Handlers are created fresh for every invocation and dropped afterwards,
//! so state kept in `self` never leaks between unrelated events.

use crate::{context::TriggerContext, error::BoxError, phase::LifecyclePhase, record::Record};
use async_trait::async_trait;

/// The result of a handler callback.
pub type HandlerResult = Result<(), BoxError>;

/// A handler bound to entity lifecycle phases.
#[async_trait]
pub trait LifecycleHandler<R: Record>: Send + Sync {
    /// Called before new records are inserted.
    async fn before_insert(&mut self, _ctx: &mut TriggerContext<R>) -> HandlerResult {
        Ok(())
    }

    /// Called before existing records are updated.
    async fn before_update(&mut self, _ctx: &mut TriggerContext<R>) -> HandlerResult {
        Ok(())
    }

    /// Called before records are deleted.
    async fn before_delete(&mut self, _ctx: &mut TriggerContext<R>) -> HandlerResult {
        Ok(())
    }

    /// Called after new records were inserted.
    async fn after_insert(&mut self, _ctx: &mut TriggerContext<R>) -> HandlerResult {
        Ok(())
    }

    /// Called after records were updated.
    async fn after_update(&mut self, _ctx: &mut TriggerContext<R>) -> HandlerResult {
        Ok(())
    }

    /// Called after records were deleted.
    async fn after_delete(&mut self, _ctx: &mut TriggerContext<R>) -> HandlerResult {
        Ok(())
    }

    /// Called after deleted records were restored.
    async fn after_undelete(&mut self, _ctx: &mut TriggerContext<R>) -> HandlerResult {
        Ok(())
    }
}

/// Invoke the one callback of `handler` that matches the context's phase.
pub async fn dispatch_phase<R: Record>(
    handler: &mut (dyn LifecycleHandler<R> + '_),
    ctx: &mut TriggerContext<R>,
) -> HandlerResult {
    match ctx.phase() {
        LifecyclePhase::BeforeInsert => handler.before_insert(ctx).await,
        LifecyclePhase::BeforeUpdate => handler.before_update(ctx).await,
        LifecyclePhase::BeforeDelete => handler.before_delete(ctx).await,
        LifecyclePhase::AfterInsert => handler.after_insert(ctx).await,
        LifecyclePhase::AfterUpdate => handler.after_update(ctx).await,
        LifecyclePhase::AfterDelete => handler.after_delete(ctx).await,
        LifecyclePhase::AfterUndelete => handler.after_undelete(ctx).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row;

    impl Record for Row {
        fn entity_type(&self) -> &str {
            "Row"
        }
    }

    #[derive(Default)]
    struct PhaseRecorder {
        seen: Vec<LifecyclePhase>,
    }

    impl PhaseRecorder {
        fn push(&mut self, phase: LifecyclePhase) -> HandlerResult {
            self.seen.push(phase);
            Ok(())
        }
    }

    #[async_trait]
    impl LifecycleHandler<Row> for PhaseRecorder {
        async fn before_insert(&mut self, _ctx: &mut TriggerContext<Row>) -> HandlerResult {
            self.push(LifecyclePhase::BeforeInsert)
        }

        async fn before_update(&mut self, _ctx: &mut TriggerContext<Row>) -> HandlerResult {
            self.push(LifecyclePhase::BeforeUpdate)
        }

        async fn before_delete(&mut self, _ctx: &mut TriggerContext<Row>) -> HandlerResult {
            self.push(LifecyclePhase::BeforeDelete)
        }

        async fn after_insert(&mut self, _ctx: &mut TriggerContext<Row>) -> HandlerResult {
            self.push(LifecyclePhase::AfterInsert)
        }

        async fn after_update(&mut self, _ctx: &mut TriggerContext<Row>) -> HandlerResult {
            self.push(LifecyclePhase::AfterUpdate)
        }

        async fn after_delete(&mut self, _ctx: &mut TriggerContext<Row>) -> HandlerResult {
            self.push(LifecyclePhase::AfterDelete)
        }

        async fn after_undelete(&mut self, _ctx: &mut TriggerContext<Row>) -> HandlerResult {
            self.push(LifecyclePhase::AfterUndelete)
        }
    }

    #[tokio::test]
    async fn test_dispatch_phase_invokes_exactly_one_callback() {
        for phase in LifecyclePhase::ALL {
            let mut handler = PhaseRecorder::default();
            let mut ctx = TriggerContext::builder(phase).new_records(vec![Row]).build();

            dispatch_phase(&mut handler, &mut ctx).await.unwrap();

            assert_eq!(handler.seen, vec![phase]);
        }
    }

    #[tokio::test]
    async fn test_unimplemented_callbacks_are_noops() {
        struct Silent;
        impl LifecycleHandler<Row> for Silent {}

        let mut ctx = TriggerContext::builder(LifecyclePhase::AfterUndelete)
            .new_records(vec![Row])
            .build();
        assert!(dispatch_phase(&mut Silent, &mut ctx).await.is_ok());
    }
}
