use rusqlite::params;

use metron_core::{TimeRange, ToolBreakdown, ToolEvent};

use crate::Db;
use crate::error::Result;
use crate::helpers::row_to_tool_event;

impl Db {
    pub fn tool_breakdown(
        &self,
        range: &TimeRange,
        account_id: Option<i64>,
    ) -> Result<Vec<ToolBreakdown>> {
        let map = |row: &rusqlite::Row<'_>| {
            Ok(ToolBreakdown {
                tool: row.get(0)?,
                uses: row.get(1)?,
            })
        };
        let rows = match account_id {
            Some(account_id) => {
                let mut stmt = self.conn.prepare(
                    r#"
                    SELECT tool, COUNT(*) AS uses
                    FROM tool_event
                    WHERE ts >= ?1 AND ts < ?2 AND account_id = ?3
                    GROUP BY tool
                    ORDER BY uses DESC, tool ASC
                    "#,
                )?;
                stmt.query_map(params![range.start, range.end, account_id], map)?
                    .collect::<std::result::Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = self.conn.prepare(
                    r#"
                    SELECT tool, COUNT(*) AS uses
                    FROM tool_event
                    WHERE ts >= ?1 AND ts < ?2
                    GROUP BY tool
                    ORDER BY uses DESC, tool ASC
                    "#,
                )?;
                stmt.query_map(params![range.start, range.end], map)?
                    .collect::<std::result::Result<Vec<_>, _>>()?
            }
        };
        Ok(rows)
    }

    pub fn recent_tool_events(&self, account_id: i64, limit: u32) -> Result<Vec<ToolEvent>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, account_id, tool, ts
            FROM tool_event
            WHERE account_id = ?1
            ORDER BY ts DESC, id DESC
            LIMIT ?2
            "#,
        )?;
        let rows = stmt
            .query_map(params![account_id, limit], row_to_tool_event)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
