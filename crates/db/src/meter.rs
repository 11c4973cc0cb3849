use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, TransactionBehavior, params};

use metron_core::{
    ConsumeOutcome, PeriodKey, Quota, ToolKind, UsageThreshold, crossed, is_stale, warn_threshold,
};

use crate::Db;
use crate::error::Result;

impl Db {
    /// The whole gate decision in one write transaction: staleness
    /// rollover, the quota check, the increment, the tool-event append
    /// and the threshold ledger all commit together. The immediate
    /// transaction takes the write lock up front, so two concurrent
    /// consumptions for the same account serialize instead of both
    /// reading the same counter.
    ///
    /// Returns `None` when the account does not exist.
    pub fn consume(
        &mut self,
        account_id: i64,
        quota: Quota,
        tool: ToolKind,
        now: DateTime<Utc>,
    ) -> Result<Option<ConsumeOutcome>> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let row = tx
            .query_row(
                "SELECT uses_this_month, period_anchor FROM account WHERE id = ?1",
                params![account_id],
                |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;
        let Some((stored, anchor)) = row else {
            return Ok(None);
        };
        let anchor = DateTime::parse_from_rfc3339(&anchor)?.with_timezone(&Utc);
        let stale = is_stale(anchor, now);
        let previous = if stale { 0 } else { stored };
        let period = PeriodKey::of(now).label();
        let now_str = now.to_rfc3339_opts(SecondsFormat::Millis, true);

        if let Quota::Limited(limit) = quota
            && previous >= limit as i64
        {
            // Denied. The counter may sit past the quota without ever
            // having equalled it (downgrade mid-period), so the 100%
            // crossing is recorded here as well; the ledger keeps it to
            // one notification per period either way.
            let mut crossings = Vec::new();
            if try_record_notification(&tx, account_id, &period, UsageThreshold::Full100, &now_str)?
            {
                crossings.push(UsageThreshold::Full100);
            }
            tx.commit()?;
            return Ok(Some(ConsumeOutcome {
                allowed: false,
                uses: previous,
                crossed: crossings,
            }));
        }

        let uses = previous + 1;
        if stale {
            tx.execute(
                "UPDATE account SET uses_this_month = ?1, period_anchor = ?2 WHERE id = ?3",
                params![uses, now_str, account_id],
            )?;
        } else {
            tx.execute(
                "UPDATE account SET uses_this_month = uses_this_month + 1 WHERE id = ?1",
                params![account_id],
            )?;
        }
        tx.execute(
            "INSERT INTO tool_event (account_id, tool, ts) VALUES (?1, ?2, ?3)",
            params![account_id, tool.as_str(), now_str],
        )?;

        let mut crossings = Vec::new();
        if let Quota::Limited(limit) = quota {
            if crossed(previous, uses, warn_threshold(limit))
                && try_record_notification(&tx, account_id, &period, UsageThreshold::Warn80, &now_str)?
            {
                crossings.push(UsageThreshold::Warn80);
            }
            if crossed(previous, uses, limit)
                && try_record_notification(&tx, account_id, &period, UsageThreshold::Full100, &now_str)?
            {
                crossings.push(UsageThreshold::Full100);
            }
        }
        tx.commit()?;
        Ok(Some(ConsumeOutcome {
            allowed: true,
            uses,
            crossed: crossings,
        }))
    }

    pub fn notifications_sent(&self, account_id: i64, period: &str) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT threshold
            FROM notification_sent
            WHERE account_id = ?1 AND period = ?2
            ORDER BY sent_at ASC, threshold ASC
            "#,
        )?;
        let rows = stmt
            .query_map(params![account_id, period], |row| row.get(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

/// Insert-or-ignore into the ledger; the primary key on
/// (account, period, threshold) is what makes a crossing fire at most
/// once per period. Returns whether this call actually inserted.
fn try_record_notification(
    conn: &Connection,
    account_id: i64,
    period: &str,
    threshold: UsageThreshold,
    sent_at: &str,
) -> Result<bool> {
    let inserted = conn.execute(
        r#"
        INSERT OR IGNORE INTO notification_sent (account_id, period, threshold, sent_at)
        VALUES (?1, ?2, ?3, ?4)
        "#,
        params![account_id, period, threshold.as_str(), sent_at],
    )?;
    Ok(inserted > 0)
}
