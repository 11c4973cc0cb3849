use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::plans;
use crate::services::{AppServices, LogSender, NotificationSender};
use metron_core::PlanRegistry;
use metron_db::Db;

/// Paths and configuration needed to run the metering backend.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub plan_defaults_path: PathBuf,
    pub registry: PlanRegistry,
}

/// Application state shared by every frontend (HTTP, CLI).
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub services: AppServices,
}

impl AppState {
    pub fn new(db_path: PathBuf, plan_defaults_path: PathBuf) -> Result<Self> {
        Self::with_notifier(db_path, plan_defaults_path, Arc::new(LogSender))
    }

    pub fn with_notifier(
        db_path: PathBuf,
        plan_defaults_path: PathBuf,
        notifier: Arc<dyn NotificationSender>,
    ) -> Result<Self> {
        let registry = plans::sync_plan_defaults(&plan_defaults_path)?;
        let config = AppConfig {
            db_path,
            plan_defaults_path,
            registry,
        };
        let services = AppServices::new(&config, notifier);
        Ok(Self { config, services })
    }

    pub fn setup_db(&self) -> Result<()> {
        setup_db(&self.config.db_path)
    }

    pub fn initialize(&self) -> Result<()> {
        self.setup_db()
            .map_err(|err| AppError::Message(format!("initialize db: {}", err)))
    }

    pub fn open_db(&self) -> Result<Db> {
        Ok(Db::open(&self.config.db_path)?)
    }
}

pub fn setup_db(path: &std::path::Path) -> Result<()> {
    let mut db = Db::open(path)?;
    db.migrate()?;
    Ok(())
}
