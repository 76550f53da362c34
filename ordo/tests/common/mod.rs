#![allow(dead_code)]

use ordo::{HandlerResult, LifecycleHandler, Record, TriggerContext, async_trait, testing::CallLog};

// ============================================================================
// Test Record Types
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct Account {
    pub id: u32,
    pub name: String,
    pub rating: Option<String>,
}

impl Account {
    pub fn new(id: u32, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            rating: None,
        }
    }
}

impl Record for Account {
    fn entity_type(&self) -> &str {
        "Account"
    }
}

/// A heterogeneous record, as a generic persistence layer would hand out.
#[derive(Clone, Debug)]
pub enum Row {
    Account(Account),
    Contact { id: u32, email: String },
}

impl Record for Row {
    fn entity_type(&self) -> &str {
        match self {
            Row::Account(_) => "Account",
            Row::Contact { .. } => "Contact",
        }
    }
}

// ============================================================================
// Test Handlers
// ============================================================================

/// Trims account names before they are written.
#[derive(Default)]
pub struct NormalizeName;

#[async_trait]
impl LifecycleHandler<Account> for NormalizeName {
    async fn before_insert(&mut self, ctx: &mut TriggerContext<Account>) -> HandlerResult {
        for account in ctx.new_records_mut().into_iter().flatten() {
            account.name = account.name.trim().to_string();
        }
        Ok(())
    }
}

/// Rates accounts by name length; relies on names being normalized first.
#[derive(Default)]
pub struct RateAccount;

#[async_trait]
impl LifecycleHandler<Account> for RateAccount {
    async fn before_insert(&mut self, ctx: &mut TriggerContext<Account>) -> HandlerResult {
        for account in ctx.new_records_mut().into_iter().flatten() {
            let rating = if account.name.len() > 5 { "Hot" } else { "Cold" };
            account.rating = Some(rating.to_string());
        }
        Ok(())
    }
}

/// Logs every after-update callback under a fixed name.
pub struct AuditUpdate {
    pub name: &'static str,
    pub log: CallLog,
}

#[async_trait]
impl LifecycleHandler<Account> for AuditUpdate {
    async fn after_update(&mut self, ctx: &mut TriggerContext<Account>) -> HandlerResult {
        self.log.push(self.name, ctx.phase());
        Ok(())
    }
}

/// Rejects deletion of any account named "Protected".
#[derive(Default)]
pub struct ProtectAccounts;

#[async_trait]
impl LifecycleHandler<Account> for ProtectAccounts {
    async fn before_delete(&mut self, ctx: &mut TriggerContext<Account>) -> HandlerResult {
        let protected = ctx
            .old_records()
            .into_iter()
            .flatten()
            .any(|account| account.name == "Protected");
        if protected {
            return Err("protected accounts cannot be deleted".into());
        }
        Ok(())
    }
}
