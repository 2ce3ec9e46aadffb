//! Alert Stream Listener
//!
//! Receives alerts pushed by the backend over a websocket and keeps a
//! bounded, most-recent-first log of them.
//!
//! ## Flow
//!
//! 1. Each text frame is decoded into an [`Alert`](crate::models::Alert);
//!    malformed frames are logged and dropped
//! 2. The alert is prepended to the [`AlertLog`] and the alert list is
//!    re-rendered
//! 3. A system notification is attempted through the [`Notifier`] when
//!    permission was granted
//!
//! The connection is re-established with capped exponential backoff until
//! the cancellation token fires.

mod error;
mod listener;
mod log;
mod notifier;

pub use error::AlertError;
pub use listener::{reconnect_delay, AlertListener};
pub use log::AlertLog;
pub use notifier::{LogNotifier, NoopNotifier, NotificationPermission, Notifier};
