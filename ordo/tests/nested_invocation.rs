//! Re-entrant dispatch: a handler whose side effects fire the lifecycle again.

use ordo::{
    HandlerCatalog, HandlerDescriptor, HandlerRegistry, HandlerResult, LifecycleHandler,
    LifecyclePhase, LoopGuard, MemoryStore, MetadataDispatcher, TriggerContext, async_trait,
    testing::CallLog,
};
use std::sync::{Arc, OnceLock};

mod common;
use common::Account;

type AccountDispatcher = MetadataDispatcher<MemoryStore, HandlerCatalog<Account>>;

/// Touches every updated account again, which re-triggers after-update.
struct TouchAgain {
    dispatcher: Arc<OnceLock<Arc<AccountDispatcher>>>,
    log: CallLog,
}

#[async_trait]
impl LifecycleHandler<Account> for TouchAgain {
    async fn after_update(&mut self, ctx: &mut TriggerContext<Account>) -> HandlerResult {
        self.log.push("TouchAgain", ctx.phase());

        let Some(dispatcher) = self.dispatcher.get().cloned() else {
            return Err("dispatcher not wired".into());
        };
        let touched = ctx.new_records().unwrap_or_default().to_vec();
        let mut nested = ctx
            .child(LifecyclePhase::AfterUpdate)
            .new_records(touched.clone())
            .old_records(touched)
            .build();
        dispatcher.run(&mut nested).await?;
        Ok(())
    }
}

fn wired_dispatcher(log: &CallLog) -> Arc<AccountDispatcher> {
    let slot: Arc<OnceLock<Arc<AccountDispatcher>>> = Arc::new(OnceLock::new());

    let handler_slot = Arc::clone(&slot);
    let handler_log = log.clone();
    let catalog = HandlerCatalog::builder()
        .register("TouchAgain", move || TouchAgain {
            dispatcher: Arc::clone(&handler_slot),
            log: handler_log.clone(),
        })
        .build()
        .unwrap();
    let store = MemoryStore::from_descriptors([HandlerDescriptor::new("Account", "TouchAgain")]);

    let dispatcher = Arc::new(MetadataDispatcher::new(HandlerRegistry::new(store), catalog));
    slot.set(Arc::clone(&dispatcher)).ok();
    dispatcher
}

#[tokio::test]
async fn test_loop_guard_bounds_reentrant_chain() {
    let log = CallLog::new();
    let dispatcher = wired_dispatcher(&log);

    let guard = LoopGuard::with_max_loops(3);
    let mut ctx = TriggerContext::builder(LifecyclePhase::AfterUpdate)
        .new_records(vec![Account::new(1, "Acme")])
        .old_records(vec![Account::new(1, "Acme")])
        .principal("alice")
        .guard(guard.clone())
        .build();

    let report = dispatcher.run(&mut ctx).await.unwrap();

    assert_eq!(report.executed, ["TouchAgain"]);
    // Three eligible runs; the fourth, nested one is refused silently.
    assert_eq!(log.len(), 3);
    assert_eq!(guard.loop_count(), 3);
}

#[tokio::test]
async fn test_separate_chains_do_not_share_counts() {
    let log = CallLog::new();
    let dispatcher = wired_dispatcher(&log);

    for _ in 0..2 {
        let mut ctx = TriggerContext::builder(LifecyclePhase::AfterUpdate)
            .new_records(vec![Account::new(1, "Acme")])
            .old_records(vec![Account::new(1, "Acme")])
            .guard(LoopGuard::with_max_loops(2))
            .build();
        dispatcher.run(&mut ctx).await.unwrap();
    }

    assert_eq!(log.len(), 4);
}
