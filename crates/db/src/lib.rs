use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;

mod accounts;
mod analytics;
mod error;
mod helpers;
mod meter;
mod migrations;
mod types;

pub use error::{DbError, Result};
pub use types::EffectiveUsage;

pub struct Db {
    conn: Connection,
}

impl Db {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "temp_store", "MEMORY")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.busy_timeout(Duration::from_secs(5))?;
        Ok(Self { conn })
    }
}
