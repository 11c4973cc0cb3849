use metron_app::{AppError, GateOutcome, RangeParams, Result, resolve_range};
use metron_core::{Account, PlanTier, ToolBreakdown, ToolEvent, ToolKind, UsageSnapshot};

use crate::{
    AccountCreateRequest, AccountDeleteRequest, AccountGetRequest, AppContext,
    BillingConfirmedRequest, ConsumeRequest, DeletedResponse, OkResponse, PlanResponse,
    PlanSetRequest, PlansResponse, UsageBreakdownRequest, UsageCurrentRequest, UsageEventsRequest,
};

pub fn accounts_create(ctx: &AppContext, req: AccountCreateRequest) -> Result<Account> {
    let email = req.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::InvalidInput("a valid email is required".to_string()));
    }
    ctx.app_state.services.accounts.create(email)
}

pub fn accounts_get(ctx: &AppContext, req: AccountGetRequest) -> Result<Account> {
    ctx.app_state.services.accounts.get(req.id)
}

pub fn accounts_list(ctx: &AppContext) -> Result<Vec<Account>> {
    ctx.app_state.services.accounts.list()
}

pub fn accounts_delete(ctx: &AppContext, req: AccountDeleteRequest) -> Result<DeletedResponse> {
    ctx.app_state.services.accounts.delete(req.id)?;
    Ok(DeletedResponse { deleted: req.id })
}

/// The entitlement gate. Every tool handler posts here before doing its
/// paid work; a Denied outcome comes back as a normal 200 payload.
pub fn consume(ctx: &AppContext, req: ConsumeRequest) -> Result<GateOutcome> {
    let tool = ToolKind::parse(&req.tool)
        .ok_or_else(|| AppError::InvalidInput(format!("unknown tool {}", req.tool)))?;
    ctx.app_state
        .services
        .entitlement
        .check_and_consume(req.account_id, tool)
}

pub fn usage_current(ctx: &AppContext, req: UsageCurrentRequest) -> Result<UsageSnapshot> {
    ctx.app_state.services.usage.current(req.account_id)
}

pub fn usage_breakdown(
    ctx: &AppContext,
    req: UsageBreakdownRequest,
) -> Result<Vec<ToolBreakdown>> {
    let range = resolve_range(&RangeParams {
        range: req.range,
        start: req.start,
        end: req.end,
    })?;
    ctx.app_state
        .services
        .usage
        .breakdown(&range, req.account_id)
}

pub fn usage_events(ctx: &AppContext, req: UsageEventsRequest) -> Result<Vec<ToolEvent>> {
    let limit = req.limit.unwrap_or(50).min(500);
    ctx.app_state.services.usage.events(req.account_id, limit)
}

pub fn plan_set(ctx: &AppContext, req: PlanSetRequest) -> Result<Account> {
    ctx.app_state
        .services
        .accounts
        .set_plan(req.account_id, &req.tier)
}

/// Payment-confirmed upgrades arrive through the billing webhook; the
/// transition itself is the same one the admin override uses.
pub fn billing_confirmed(ctx: &AppContext, req: BillingConfirmedRequest) -> Result<Account> {
    ctx.app_state
        .services
        .accounts
        .set_plan(req.account_id, &req.tier)
}

pub fn plans_list(ctx: &AppContext) -> PlansResponse {
    let registry = &ctx.app_state.config.registry;
    let plans = PlanTier::ALL
        .iter()
        .map(|tier| PlanResponse {
            tier: tier.as_str().to_string(),
            quota: registry.quota(*tier).limit(),
        })
        .collect();
    PlansResponse { plans }
}

pub fn ok() -> OkResponse {
    OkResponse { ok: true }
}
