mod support;

use support::{AUGUST, JULY, consume, setup_account, setup_db, ts};

use metron_core::{PlanTier, Quota};

#[test]
fn create_account_starts_on_free_plan() {
    let test_db = setup_db();
    let account = setup_account(&test_db.db, "arch@example.gr", AUGUST);
    assert_eq!(account.plan, "free");
    assert_eq!(account.uses_this_month, 0);
    assert!(account.period_anchor.starts_with("2026-08"));
    assert_eq!(account.created_at, account.period_anchor);
}

#[test]
fn duplicate_email_is_rejected() {
    let test_db = setup_db();
    setup_account(&test_db.db, "arch@example.gr", AUGUST);
    assert!(
        test_db
            .db
            .create_account("arch@example.gr", ts(AUGUST))
            .is_err()
    );
}

#[test]
fn get_account_by_email_finds_the_row() {
    let test_db = setup_db();
    let created = setup_account(&test_db.db, "arch@example.gr", AUGUST);
    let found = test_db
        .db
        .get_account_by_email("arch@example.gr")
        .expect("get")
        .expect("account");
    assert_eq!(found, created);
}

#[test]
fn list_accounts_orders_by_creation() {
    let test_db = setup_db();
    setup_account(&test_db.db, "first@example.gr", JULY);
    setup_account(&test_db.db, "second@example.gr", AUGUST);
    let accounts = test_db.db.list_accounts().expect("list");
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].email, "first@example.gr");
    assert_eq!(accounts[1].email, "second@example.gr");
}

#[test]
fn set_plan_keeps_usage_and_anchor() {
    let mut test_db = setup_db();
    let account = setup_account(&test_db.db, "arch@example.gr", AUGUST);
    for _ in 0..4 {
        consume(&mut test_db.db, account.id, Quota::Limited(10), AUGUST);
    }

    let updated = test_db
        .db
        .set_plan(account.id, PlanTier::Starter)
        .expect("set plan")
        .expect("account");
    assert_eq!(updated.plan, "starter");
    assert_eq!(updated.uses_this_month, 4);
    assert_eq!(updated.period_anchor, account.period_anchor);
}

#[test]
fn missing_account_is_none() {
    let test_db = setup_db();
    assert!(test_db.db.get_account(99).expect("get").is_none());
    assert!(
        test_db
            .db
            .set_plan(99, PlanTier::Starter)
            .expect("set plan")
            .is_none()
    );
    assert!(
        test_db
            .db
            .usage_snapshot(99, ts(AUGUST))
            .expect("snapshot")
            .is_none()
    );
}

#[test]
fn delete_account_cascades() {
    let mut test_db = setup_db();
    let account = setup_account(&test_db.db, "arch@example.gr", AUGUST);
    for _ in 0..10 {
        consume(&mut test_db.db, account.id, Quota::Limited(10), AUGUST);
    }
    test_db.db.delete_account(account.id).expect("delete");

    assert!(test_db.db.get_account(account.id).expect("get").is_none());
    assert!(
        test_db
            .db
            .recent_tool_events(account.id, 10)
            .expect("events")
            .is_empty()
    );
    assert!(
        test_db
            .db
            .notifications_sent(account.id, "2026-08")
            .expect("sent")
            .is_empty()
    );
}
