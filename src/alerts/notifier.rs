//! System notifications

use super::AlertError;
use crate::models::Alert;

/// Whether the host lets us raise notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPermission {
    Granted,
    Denied,
    Unsupported,
}

/// Best-effort system notification channel
///
/// `notify` is only called once `permission` reports `Granted`.
pub trait Notifier: Send + Sync {
    fn permission(&self) -> NotificationPermission;

    fn notify(&self, alert: &Alert) -> Result<(), AlertError>;
}

/// Host without notification support
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn permission(&self) -> NotificationPermission {
        NotificationPermission::Unsupported
    }

    fn notify(&self, _alert: &Alert) -> Result<(), AlertError> {
        Ok(())
    }
}

/// Raises notifications as log lines, for headless runs
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn permission(&self) -> NotificationPermission {
        NotificationPermission::Granted
    }

    fn notify(&self, alert: &Alert) -> Result<(), AlertError> {
        tracing::info!(
            severity = %alert.severity,
            title = %alert.title,
            body = %alert.message,
            "Notification"
        );
        Ok(())
    }
}
