use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::util::ServiceExt;

use app_api::AppContext;
use metron_app::{AppPaths, AppState, ensure_app_data_dir};

use http_api::HttpState;

const TEST_TOKEN: &str = "testtoken";

struct TestApp {
    _temp_dir: tempfile::TempDir,
    router: axum::Router,
}

fn build_app() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let paths = AppPaths::new(temp_dir.path().to_path_buf());
    ensure_app_data_dir(&paths).expect("ensure app data dir");
    let app_state =
        AppState::new(paths.db_path, paths.plan_defaults_path).expect("app state");
    app_state.setup_db().expect("setup db");

    let context = AppContext {
        app_state,
        app_data_dir: paths.app_data_dir,
    };
    let state = HttpState::new(context, TEST_TOKEN.to_string());
    let router = http_api::router(state);

    TestApp {
        _temp_dir: temp_dir,
        router,
    }
}

async fn post(router: &axum::Router, path: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header(header::CONTENT_TYPE, "application/json")
                .header("x-metron-token", TEST_TOKEN)
                .body(Body::from(body.to_string()))
                .expect("request"),
        )
        .await
        .expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let payload = serde_json::from_slice(&bytes).expect("json body");
    (status, payload)
}

#[tokio::test]
async fn api_rejects_missing_token() {
    let app = build_app();

    let response = app
        .router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/accounts_list")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let payload: Value = serde_json::from_slice(&body).expect("json body");
    assert_eq!(payload["code"], "token_invalid");
}

#[tokio::test]
async fn consume_flow_over_http() {
    let app = build_app();

    let (status, account) = post(
        &app.router,
        "/api/accounts_create",
        json!({ "email": "arch@example.gr" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(account["plan"], "free");
    let account_id = account["id"].as_i64().expect("id");

    for n in 1..=10 {
        let (status, outcome) = post(
            &app.router,
            "/api/consume",
            json!({ "account_id": account_id, "tool": "qa" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(outcome["allowed"], true);
        assert_eq!(outcome["used"], n);
    }

    // Denial is a domain result: still HTTP 200.
    let (status, outcome) = post(
        &app.router,
        "/api/consume",
        json!({ "account_id": account_id, "tool": "qa" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["allowed"], false);
    assert_eq!(outcome["used"], 10);
    assert_eq!(outcome["reason"], "monthly quota exhausted");

    let (status, snapshot) = post(
        &app.router,
        "/api/usage_current",
        json!({ "account_id": account_id }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["used"], 10);
    assert_eq!(snapshot["quota"], 10);

    let (status, upgraded) = post(
        &app.router,
        "/api/billing_confirmed",
        json!({ "account_id": account_id, "tier": "starter" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(upgraded["plan"], "starter");
    assert_eq!(upgraded["uses_this_month"], 10);

    let (status, outcome) = post(
        &app.router,
        "/api/consume",
        json!({ "account_id": account_id, "tool": "blueprint_analysis" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["allowed"], true);
    assert_eq!(outcome["used"], 11);

    let (status, breakdown) = post(
        &app.router,
        "/api/usage_breakdown",
        json!({ "account_id": account_id }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let tools = breakdown.as_array().expect("array");
    assert_eq!(tools.len(), 2);
    assert_eq!(tools[0]["tool"], "qa");
    assert_eq!(tools[0]["uses"], 10);
}

#[tokio::test]
async fn unknown_tool_is_invalid_input() {
    let app = build_app();

    let (status, account) = post(
        &app.router,
        "/api/accounts_create",
        json!({ "email": "arch@example.gr" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let account_id = account["id"].as_i64().expect("id");

    let (status, payload) = post(
        &app.router,
        "/api/consume",
        json!({ "account_id": account_id, "tool": "tarot_reading" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["code"], "invalid_input");
}

#[tokio::test]
async fn missing_account_is_not_found() {
    let app = build_app();

    let (status, payload) = post(
        &app.router,
        "/api/usage_current",
        json!({ "account_id": 4242 }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(payload["code"], "not_found");
}

#[tokio::test]
async fn plans_list_reports_the_registry() {
    let app = build_app();

    let (status, payload) = post(&app.router, "/api/plans_list", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    let plans = payload["plans"].as_array().expect("plans");
    assert_eq!(plans.len(), 4);
    assert_eq!(plans[0]["tier"], "free");
    assert_eq!(plans[0]["quota"], 10);
    assert_eq!(plans[3]["tier"], "unlimited");
    assert!(plans[3]["quota"].is_null());
}
