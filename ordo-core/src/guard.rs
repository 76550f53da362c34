//! Run-eligibility guard.
//!
//! Handlers frequently write to the entities they are bound to, which fires
//! the lifecycle again. A guard caps how many times the dispatcher may run
//! within one logical invocation chain.

use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

/// The eligibility and loop-count capability the dispatcher composes with.
pub trait RunGuard: Send + Sync {
    /// Whether a run may proceed.
    fn is_eligible(&self) -> bool;

    /// Record that a run has started.
    fn enter(&self);
}

/// The standard [`RunGuard`]: a loop counter with an optional limit and a
/// bypass switch.
///
/// Clones share the same counter, so every invocation built from the same
/// guard belongs to the same chain. Create a new guard per top-level
/// operation.
#[derive(Debug, Clone)]
pub struct LoopGuard {
    count: Arc<AtomicUsize>,
    bypassed: Arc<AtomicBool>,
    max_loops: Option<usize>,
}

impl LoopGuard {
    /// A guard that never trips on the loop count.
    pub fn unbounded() -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
            bypassed: Arc::new(AtomicBool::new(false)),
            max_loops: None,
        }
    }

    /// A guard that allows at most `max_loops` runs in its chain.
    pub fn with_max_loops(max_loops: usize) -> Self {
        Self {
            max_loops: Some(max_loops),
            ..Self::unbounded()
        }
    }

    /// Number of runs entered so far in this chain.
    pub fn loop_count(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }

    /// The configured limit, if any.
    pub fn max_loops(&self) -> Option<usize> {
        self.max_loops
    }

    /// Make every following run in this chain ineligible.
    pub fn bypass(&self) {
        self.bypassed.store(true, Ordering::Release);
    }

    /// Undo [`bypass`](Self::bypass).
    pub fn clear_bypass(&self) {
        self.bypassed.store(false, Ordering::Release);
    }

    /// Whether the chain is currently bypassed.
    pub fn is_bypassed(&self) -> bool {
        self.bypassed.load(Ordering::Acquire)
    }
}

impl Default for LoopGuard {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl RunGuard for LoopGuard {
    fn is_eligible(&self) -> bool {
        if self.is_bypassed() {
            return false;
        }
        self.max_loops.is_none_or(|max| self.loop_count() < max)
    }

    fn enter(&self) {
        self.count.fetch_add(1, Ordering::AcqRel);
    }
}
