//! Alert stream errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlertError {
    #[error("Alert stream connection failed: {0}")]
    Connect(String),

    #[error("Malformed alert: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Notification failed: {0}")]
    Notify(String),
}
