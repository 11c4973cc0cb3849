mod support;

use rusqlite::Connection;

use support::setup_db;

#[test]
fn migrate_is_idempotent() {
    let mut test_db = setup_db();
    test_db.db.migrate().expect("second migrate");
}

#[test]
fn migrate_creates_the_expected_tables() {
    let test_db = setup_db();
    let conn = Connection::open(&test_db.path).expect("open conn");
    for table in ["account", "tool_event", "notification_sent"] {
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [table],
                |row| row.get(0),
            )
            .expect("table lookup");
        assert_eq!(count, 1, "missing table {table}");
    }
}
