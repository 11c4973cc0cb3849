use chrono::Utc;

use crate::error::Result;
use crate::services::{SharedConfig, missing_account, open_db, resolve_quota};
use metron_core::{PeriodKey, TimeRange, ToolBreakdown, ToolEvent, UsageSnapshot};
use metron_db::Db;

#[derive(Clone)]
pub struct UsageService {
    config: SharedConfig,
}

impl UsageService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    fn db(&self) -> Result<Db> {
        open_db(&self.config)
    }

    /// Effective usage for the client quota display. Applies the same
    /// staleness rule as the meter, so a dashboard opened after a month
    /// boundary never shows last month's count.
    pub fn current(&self, account_id: i64) -> Result<UsageSnapshot> {
        let db = self.db()?;
        let account = db
            .get_account(account_id)?
            .ok_or_else(|| missing_account(account_id))?;
        let now = Utc::now();
        let effective = db
            .usage_snapshot(account_id, now)?
            .ok_or_else(|| missing_account(account_id))?;
        let quota = resolve_quota(&self.config, account_id, &account.plan);
        Ok(UsageSnapshot {
            used: effective.used,
            quota: quota.limit(),
            period: PeriodKey::of(now).label(),
            stale: effective.stale,
        })
    }

    pub fn breakdown(
        &self,
        range: &TimeRange,
        account_id: Option<i64>,
    ) -> Result<Vec<ToolBreakdown>> {
        let db = self.db()?;
        Ok(db.tool_breakdown(range, account_id)?)
    }

    pub fn events(&self, account_id: i64, limit: u32) -> Result<Vec<ToolEvent>> {
        let db = self.db()?;
        db.get_account(account_id)?
            .ok_or_else(|| missing_account(account_id))?;
        Ok(db.recent_tool_events(account_id, limit)?)
    }
}
