use thiserror::Error;

use metron_core::UsageThreshold;

#[derive(Debug, Error)]
#[error("notification delivery failed: {0}")]
pub struct NotifyError(pub String);

/// Transport seam for threshold alerts. The real deployment plugs an
/// email sender in here; the gate only ever logs a failed delivery and
/// moves on, a decision already made is never blocked by it.
pub trait NotificationSender: Send + Sync {
    fn send(
        &self,
        email: &str,
        threshold: UsageThreshold,
        used: i64,
        quota: Option<u32>,
    ) -> Result<(), NotifyError>;
}

pub struct LogSender;

impl NotificationSender for LogSender {
    fn send(
        &self,
        email: &str,
        threshold: UsageThreshold,
        used: i64,
        quota: Option<u32>,
    ) -> Result<(), NotifyError> {
        tracing::info!(
            email,
            threshold = threshold.as_str(),
            used,
            quota,
            "usage threshold notification"
        );
        Ok(())
    }
}
