use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::error::Result;
use crate::services::{NotificationSender, SharedConfig, missing_account, open_db, resolve_quota};
use metron_core::{Account, ConsumeOutcome, Quota, ToolKind};
use metron_db::Db;

/// The gate's answer. Denial is a domain result, not an error: callers
/// get it back with HTTP 200 and render the quota-exhausted message,
/// while infrastructure failures surface as `AppError`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GateOutcome {
    pub allowed: bool,
    pub used: i64,
    pub quota: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Clone)]
pub struct EntitlementService {
    config: SharedConfig,
    notifier: Arc<dyn NotificationSender>,
}

impl EntitlementService {
    pub(super) fn new(config: SharedConfig, notifier: Arc<dyn NotificationSender>) -> Self {
        Self { config, notifier }
    }

    fn db(&self) -> Result<Db> {
        open_db(&self.config)
    }

    /// Check the account's entitlement and, when allowed, consume one
    /// use. Threshold crossings recorded by the meter are handed to the
    /// notifier after the decision is committed.
    pub fn check_and_consume(&self, account_id: i64, tool: ToolKind) -> Result<GateOutcome> {
        let mut db = self.db()?;
        let account = db
            .get_account(account_id)?
            .ok_or_else(|| missing_account(account_id))?;
        let quota = resolve_quota(&self.config, account_id, &account.plan);
        let outcome = db
            .consume(account_id, quota, tool, Utc::now())?
            .ok_or_else(|| missing_account(account_id))?;
        self.dispatch_notifications(&account, &outcome, quota);
        Ok(GateOutcome {
            allowed: outcome.allowed,
            used: outcome.uses,
            quota: quota.limit(),
            reason: (!outcome.allowed).then(|| "monthly quota exhausted".to_string()),
        })
    }

    fn dispatch_notifications(&self, account: &Account, outcome: &ConsumeOutcome, quota: Quota) {
        for threshold in &outcome.crossed {
            if let Err(err) =
                self.notifier
                    .send(&account.email, *threshold, outcome.uses, quota.limit())
            {
                tracing::warn!(
                    account_id = account.id,
                    threshold = threshold.as_str(),
                    error = %err,
                    "failed to deliver threshold notification"
                );
            }
        }
    }
}
