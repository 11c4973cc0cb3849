pub mod app;
pub mod config;
pub mod error;
pub mod plans;
pub mod services;
pub mod startup;
pub mod util;

pub use app::{AppConfig, AppState};
pub use config::RangeParams;
pub use error::{ApiError, AppError, Result};
pub use plans::{load_initial_plans, load_plan_defaults, sync_plan_defaults, write_plan_defaults};
pub use services::{
    AppServices, EntitlementService, GateOutcome, LogSender, NotificationSender, NotifyError,
};
pub use startup::{AppPaths, ensure_app_data_dir};
pub use util::time::{normalize_rfc3339_to_utc, resolve_range};
