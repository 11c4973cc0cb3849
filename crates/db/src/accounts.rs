use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{OptionalExtension, params};

use metron_core::{Account, PlanTier, is_stale};

use crate::Db;
use crate::error::Result;
use crate::helpers::row_to_account;
use crate::types::EffectiveUsage;

impl Db {
    pub fn create_account(&self, email: &str, now: DateTime<Utc>) -> Result<Account> {
        let now = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        self.conn.execute(
            r#"
            INSERT INTO account (email, plan, uses_this_month, period_anchor, created_at)
            VALUES (?1, 'free', 0, ?2, ?3)
            "#,
            params![email, now, now],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get_account(id)?
            .ok_or_else(|| crate::error::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    pub fn get_account(&self, id: i64) -> Result<Option<Account>> {
        self.conn
            .query_row(
                r#"
                SELECT id, email, plan, uses_this_month, period_anchor, created_at
                FROM account
                WHERE id = ?1
                "#,
                params![id],
                row_to_account,
            )
            .optional()
            .map_err(crate::error::DbError::from)
    }

    pub fn get_account_by_email(&self, email: &str) -> Result<Option<Account>> {
        self.conn
            .query_row(
                r#"
                SELECT id, email, plan, uses_this_month, period_anchor, created_at
                FROM account
                WHERE email = ?1
                "#,
                params![email],
                row_to_account,
            )
            .optional()
            .map_err(crate::error::DbError::from)
    }

    pub fn list_accounts(&self) -> Result<Vec<Account>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, email, plan, uses_this_month, period_anchor, created_at
            FROM account
            ORDER BY created_at ASC, id ASC
            "#,
        )?;
        let rows = stmt
            .query_map([], row_to_account)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Plan transitions touch the tier only. The counter and its anchor
    /// survive upgrades and downgrades alike, so cycling plans cannot
    /// mint fresh quota mid-period.
    pub fn set_plan(&self, id: i64, tier: PlanTier) -> Result<Option<Account>> {
        let changed = self.conn.execute(
            "UPDATE account SET plan = ?1 WHERE id = ?2",
            params![tier.as_str(), id],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        self.get_account(id)
    }

    /// Pure read of the effective counter. A stale period reads as zero;
    /// nothing is persisted here, only `consume` writes the rollover.
    pub fn usage_snapshot(&self, id: i64, now: DateTime<Utc>) -> Result<Option<EffectiveUsage>> {
        let row = self
            .conn
            .query_row(
                "SELECT uses_this_month, period_anchor FROM account WHERE id = ?1",
                params![id],
                |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;
        let Some((uses, anchor)) = row else {
            return Ok(None);
        };
        let anchor = DateTime::parse_from_rfc3339(&anchor)?.with_timezone(&Utc);
        let stale = is_stale(anchor, now);
        Ok(Some(EffectiveUsage {
            used: if stale { 0 } else { uses },
            stale,
        }))
    }

    pub fn delete_account(&mut self, id: i64) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM tool_event WHERE account_id = ?1", params![id])?;
        tx.execute(
            "DELETE FROM notification_sent WHERE account_id = ?1",
            params![id],
        )?;
        tx.execute("DELETE FROM account WHERE id = ?1", params![id])?;
        tx.commit()?;
        Ok(())
    }
}
