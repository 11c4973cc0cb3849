use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct EmptyRequest {}

#[derive(Debug, Deserialize)]
pub struct AccountCreateRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct AccountGetRequest {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct AccountDeleteRequest {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct ConsumeRequest {
    pub account_id: i64,
    pub tool: String,
}

#[derive(Debug, Deserialize)]
pub struct UsageCurrentRequest {
    pub account_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UsageBreakdownRequest {
    pub account_id: Option<i64>,
    pub range: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UsageEventsRequest {
    pub account_id: i64,
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct PlanSetRequest {
    pub account_id: i64,
    pub tier: String,
}

#[derive(Debug, Deserialize)]
pub struct BillingConfirmedRequest {
    pub account_id: i64,
    pub tier: String,
}
