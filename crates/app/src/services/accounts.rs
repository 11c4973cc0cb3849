use chrono::Utc;

use crate::error::{AppError, Result};
use crate::services::{SharedConfig, missing_account, open_db};
use metron_core::{Account, PlanTier};
use metron_db::Db;

#[derive(Clone)]
pub struct AccountsService {
    config: SharedConfig,
}

impl AccountsService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    fn db(&self) -> Result<Db> {
        open_db(&self.config)
    }

    pub fn create(&self, email: &str) -> Result<Account> {
        let db = self.db()?;
        if db.get_account_by_email(email)?.is_some() {
            return Err(AppError::InvalidInput(format!(
                "email {} is already registered",
                email
            )));
        }
        Ok(db.create_account(email, Utc::now())?)
    }

    pub fn get(&self, id: i64) -> Result<Account> {
        let db = self.db()?;
        db.get_account(id)?.ok_or_else(|| missing_account(id))
    }

    pub fn list(&self) -> Result<Vec<Account>> {
        let db = self.db()?;
        Ok(db.list_accounts()?)
    }

    /// Apply a plan transition: the admin override and the payment
    /// webhook both land here. Only the tier changes; the usage counter
    /// and its period anchor are deliberately left alone.
    pub fn set_plan(&self, id: i64, tier: &str) -> Result<Account> {
        let tier = PlanTier::parse(tier)
            .ok_or_else(|| AppError::InvalidInput(format!("unknown plan tier {}", tier)))?;
        let db = self.db()?;
        db.set_plan(id, tier)?.ok_or_else(|| missing_account(id))
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        let mut db = self.db()?;
        db.get_account(id)?.ok_or_else(|| missing_account(id))?;
        Ok(db.delete_account(id)?)
    }
}
