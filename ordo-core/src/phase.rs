//! Lifecycle phases.

use crate::error::ParsePhaseError;
use std::{fmt, str::FromStr};

/// A named point in an entity's mutation lifecycle at which handlers run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LifecyclePhase {
    /// Before new records are inserted.
    BeforeInsert,
    /// Before existing records are updated.
    BeforeUpdate,
    /// Before records are deleted.
    BeforeDelete,
    /// After new records were inserted.
    AfterInsert,
    /// After records were updated.
    AfterUpdate,
    /// After records were deleted.
    AfterDelete,
    /// After deleted records were restored.
    AfterUndelete,
}

impl LifecyclePhase {
    /// Every phase, in lifecycle order.
    pub const ALL: [LifecyclePhase; 7] = [
        LifecyclePhase::BeforeInsert,
        LifecyclePhase::BeforeUpdate,
        LifecyclePhase::BeforeDelete,
        LifecyclePhase::AfterInsert,
        LifecyclePhase::AfterUpdate,
        LifecyclePhase::AfterDelete,
        LifecyclePhase::AfterUndelete,
    ];

    /// The snake_case name of this phase.
    pub const fn as_str(self) -> &'static str {
        match self {
            LifecyclePhase::BeforeInsert => "before_insert",
            LifecyclePhase::BeforeUpdate => "before_update",
            LifecyclePhase::BeforeDelete => "before_delete",
            LifecyclePhase::AfterInsert => "after_insert",
            LifecyclePhase::AfterUpdate => "after_update",
            LifecyclePhase::AfterDelete => "after_delete",
            LifecyclePhase::AfterUndelete => "after_undelete",
        }
    }

    /// Whether this phase runs before the mutation is persisted.
    pub const fn is_before(self) -> bool {
        matches!(
            self,
            LifecyclePhase::BeforeInsert | LifecyclePhase::BeforeUpdate | LifecyclePhase::BeforeDelete
        )
    }

    /// Whether this phase runs after the mutation is persisted.
    pub const fn is_after(self) -> bool {
        !self.is_before()
    }

    /// Whether invocations of this phase normally carry a new record set.
    pub const fn expects_new_records(self) -> bool {
        !matches!(
            self,
            LifecyclePhase::BeforeDelete | LifecyclePhase::AfterDelete
        )
    }

    /// Whether invocations of this phase normally carry an old record set.
    pub const fn expects_old_records(self) -> bool {
        matches!(
            self,
            LifecyclePhase::BeforeUpdate
                | LifecyclePhase::AfterUpdate
                | LifecyclePhase::BeforeDelete
                | LifecyclePhase::AfterDelete
        )
    }
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifecyclePhase {
    type Err = ParsePhaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LifecyclePhase::ALL
            .into_iter()
            .find(|phase| phase.as_str() == s)
            .ok_or_else(|| ParsePhaseError(s.to_string()))
    }
}
