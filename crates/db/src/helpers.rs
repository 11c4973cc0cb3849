use rusqlite::Row;

use metron_core::{Account, ToolEvent};

pub(crate) fn row_to_account(row: &Row<'_>) -> std::result::Result<Account, rusqlite::Error> {
    Ok(Account {
        id: row.get(0)?,
        email: row.get(1)?,
        plan: row.get(2)?,
        uses_this_month: row.get(3)?,
        period_anchor: row.get(4)?,
        created_at: row.get(5)?,
    })
}

pub(crate) fn row_to_tool_event(row: &Row<'_>) -> std::result::Result<ToolEvent, rusqlite::Error> {
    Ok(ToolEvent {
        id: row.get(0)?,
        account_id: row.get(1)?,
        tool: row.get(2)?,
        ts: row.get(3)?,
    })
}
