mod accounts;
mod entitlement;
mod notify;
mod usage;

use std::sync::Arc;

use crate::app::AppConfig;
use crate::error::{AppError, Result};
use metron_core::{PlanTier, Quota};
use metron_db::Db;

pub use accounts::AccountsService;
pub use entitlement::{EntitlementService, GateOutcome};
pub use notify::{LogSender, NotificationSender, NotifyError};
pub use usage::UsageService;

type SharedConfig = Arc<AppConfig>;

/// Service registry for app-level operations.
#[derive(Clone)]
pub struct AppServices {
    pub accounts: AccountsService,
    pub entitlement: EntitlementService,
    pub usage: UsageService,
}

impl AppServices {
    pub(crate) fn new(config: &AppConfig, notifier: Arc<dyn NotificationSender>) -> Self {
        let shared = Arc::new(config.clone());
        Self {
            accounts: AccountsService::new(shared.clone()),
            entitlement: EntitlementService::new(shared.clone(), notifier),
            usage: UsageService::new(shared),
        }
    }
}

fn open_db(config: &SharedConfig) -> Result<Db> {
    Ok(Db::open(&config.db_path)?)
}

fn missing_account(id: i64) -> AppError {
    AppError::NotFound(format!("account {} not found", id))
}

/// Resolve a stored tier string against the registry. An unknown tier is
/// a data-integrity fault: log it and deny by resolving to a zero quota,
/// never to unlimited.
fn resolve_quota(config: &AppConfig, account_id: i64, plan: &str) -> Quota {
    match PlanTier::parse(plan) {
        Some(tier) => config.registry.quota(tier),
        None => {
            tracing::warn!(account_id, plan, "unknown plan tier, treating as zero quota");
            Quota::Limited(0)
        }
    }
}
