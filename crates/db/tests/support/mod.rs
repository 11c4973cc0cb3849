#![allow(dead_code)]

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tempfile::TempDir;
use metron_core::{Account, ConsumeOutcome, Quota, ToolKind};
use metron_db::Db;

pub const JULY: &str = "2026-07-10T09:00:00Z";
pub const AUGUST: &str = "2026-08-07T09:00:00Z";

pub struct TestDb {
    pub _dir: TempDir,
    pub db: Db,
    pub path: PathBuf,
}

pub fn setup_db() -> TestDb {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("test.sqlite");
    let mut db = Db::open(&path).expect("open db");
    db.migrate().expect("migrate db");
    TestDb {
        _dir: dir,
        db,
        path,
    }
}

pub fn ts(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .expect("timestamp")
        .with_timezone(&Utc)
}

pub fn setup_account(db: &Db, email: &str, now: &str) -> Account {
    db.create_account(email, ts(now)).expect("create account")
}

pub fn consume(db: &mut Db, id: i64, quota: Quota, now: &str) -> ConsumeOutcome {
    db.consume(id, quota, ToolKind::Qa, ts(now))
        .expect("consume")
        .expect("account exists")
}
