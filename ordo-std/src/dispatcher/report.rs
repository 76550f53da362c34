//! Per-run diagnostics.

use ordo_core::{HandlerDescriptor, InstantiationError, LifecyclePhase};

/// How a dispatch run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The guard refused the run; nothing was resolved or executed.
    Ineligible,
    /// Every resolved descriptor was either executed or skipped.
    Completed,
}

/// A descriptor whose handler could not be created.
#[derive(Debug)]
pub struct SkippedHandler {
    /// The descriptor that was skipped.
    pub descriptor: HandlerDescriptor,
    /// Why its handler could not be created.
    pub reason: InstantiationError,
}

/// What a single dispatch run did.
#[derive(Debug)]
pub struct DispatchReport {
    /// The dispatched phase.
    pub phase: LifecyclePhase,
    /// The entity type, once determined.
    pub entity_type: Option<String>,
    /// How the run ended.
    pub outcome: RunOutcome,
    /// Identifiers of the executed handlers, in execution order.
    pub executed: Vec<String>,
    /// Descriptors skipped because their handler could not be created.
    pub skipped: Vec<SkippedHandler>,
}

impl DispatchReport {
    pub(crate) fn ineligible(phase: LifecyclePhase) -> Self {
        Self {
            phase,
            entity_type: None,
            outcome: RunOutcome::Ineligible,
            executed: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub(crate) fn started(phase: LifecyclePhase, entity_type: &str) -> Self {
        Self {
            phase,
            entity_type: Some(entity_type.to_string()),
            outcome: RunOutcome::Completed,
            executed: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Whether the run went through all resolved descriptors.
    pub fn is_completed(&self) -> bool {
        self.outcome == RunOutcome::Completed
    }

    /// Identifiers of the skipped handlers, in resolution order.
    pub fn skipped_ids(&self) -> Vec<&str> {
        self.skipped
            .iter()
            .map(|skip| skip.descriptor.handler_id.as_str())
            .collect()
    }
}
