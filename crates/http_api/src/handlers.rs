use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use app_api::{
    AccountCreateRequest, AccountDeleteRequest, AccountGetRequest, BillingConfirmedRequest,
    ConsumeRequest, PlanSetRequest, UsageBreakdownRequest, UsageCurrentRequest, UsageEventsRequest,
};

use crate::{errors::HttpError, state::HttpState};

pub async fn accounts_create(
    State(state): State<HttpState>,
    Json(req): Json<AccountCreateRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::accounts_create(&state.context, req)?;
    Ok(Json(response))
}

pub async fn accounts_get(
    State(state): State<HttpState>,
    Json(req): Json<AccountGetRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::accounts_get(&state.context, req)?;
    Ok(Json(response))
}

pub async fn accounts_list(
    State(state): State<HttpState>,
    Json(_): Json<app_api::EmptyRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::accounts_list(&state.context)?;
    Ok(Json(response))
}

pub async fn accounts_delete(
    State(state): State<HttpState>,
    Json(req): Json<AccountDeleteRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::accounts_delete(&state.context, req)?;
    Ok(Json(response))
}

pub async fn consume(
    State(state): State<HttpState>,
    Json(req): Json<ConsumeRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::consume(&state.context, req)?;
    Ok(Json(response))
}

pub async fn usage_current(
    State(state): State<HttpState>,
    Json(req): Json<UsageCurrentRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::usage_current(&state.context, req)?;
    Ok(Json(response))
}

pub async fn usage_breakdown(
    State(state): State<HttpState>,
    Json(req): Json<UsageBreakdownRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::usage_breakdown(&state.context, req)?;
    Ok(Json(response))
}

pub async fn usage_events(
    State(state): State<HttpState>,
    Json(req): Json<UsageEventsRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::usage_events(&state.context, req)?;
    Ok(Json(response))
}

pub async fn plan_set(
    State(state): State<HttpState>,
    Json(req): Json<PlanSetRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::plan_set(&state.context, req)?;
    Ok(Json(response))
}

pub async fn billing_confirmed(
    State(state): State<HttpState>,
    Json(req): Json<BillingConfirmedRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::billing_confirmed(&state.context, req)?;
    Ok(Json(response))
}

pub async fn plans_list(
    State(state): State<HttpState>,
    Json(_): Json<app_api::EmptyRequest>,
) -> Result<impl IntoResponse, HttpError> {
    Ok(Json(app_api::plans_list(&state.context)))
}

pub async fn healthz() -> impl IntoResponse {
    Json(app_api::ok())
}

pub async fn not_found() -> Response {
    HttpError::new(
        StatusCode::NOT_FOUND,
        "not found",
        Some("not_found".to_string()),
    )
    .into_response()
}
