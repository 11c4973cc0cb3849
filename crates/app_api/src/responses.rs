use serde::Serialize;

#[derive(Serialize)]
pub struct PlanResponse {
    pub tier: String,
    pub quota: Option<u32>,
}

#[derive(Serialize)]
pub struct PlansResponse {
    pub plans: Vec<PlanResponse>,
}

#[derive(Serialize)]
pub struct DeletedResponse {
    pub deleted: i64,
}

#[derive(Serialize)]
pub struct OkResponse {
    pub ok: bool,
}
