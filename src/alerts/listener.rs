//! Websocket alert listener with auto-reconnect

use futures_util::{Stream, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

use super::{AlertError, AlertLog, NotificationPermission, Notifier};
use crate::config::AlertsConfig;
use crate::models::Alert;
use crate::render::{RenderSurface, RenderTarget};

/// Delay before reconnect attempt `attempt` (0-based)
///
/// Doubles from `initial` and never exceeds `max`.
pub fn reconnect_delay(attempt: u32, initial: Duration, max: Duration) -> Duration {
    let factor = 2u32.saturating_pow(attempt.min(16));
    initial.saturating_mul(factor).min(max)
}

/// Consumes the alert stream and feeds the alert list
pub struct AlertListener {
    config: AlertsConfig,
    log: RwLock<AlertLog>,
    surface: Arc<dyn RenderSurface>,
    notifier: Arc<dyn Notifier>,
}

impl AlertListener {
    pub fn new(
        config: AlertsConfig,
        surface: Arc<dyn RenderSurface>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let log = AlertLog::new(config.max_retained);
        Self {
            config,
            log: RwLock::new(log),
            surface,
            notifier,
        }
    }

    /// Current alerts, newest first
    pub async fn alerts(&self) -> Vec<Alert> {
        self.log.read().await.to_vec()
    }

    /// Handle one text frame
    ///
    /// A malformed frame leaves the log untouched and returns `Parse`.
    pub async fn handle_message(&self, text: &str) -> Result<Alert, AlertError> {
        let alert: Alert = serde_json::from_str(text)?;

        {
            let mut log = self.log.write().await;
            if log.push(alert.clone()).is_some() {
                tracing::trace!(capacity = log.capacity(), "Oldest alert evicted");
            }
            if self.surface.has_target(RenderTarget::Alerts) {
                self.surface.render_alerts(&log.to_vec());
            }
        }

        tracing::info!(severity = %alert.severity, title = %alert.title, "Alert received");
        self.notify(&alert);
        Ok(alert)
    }

    fn notify(&self, alert: &Alert) {
        if !self.config.notifications {
            return;
        }
        match self.notifier.permission() {
            NotificationPermission::Granted => {
                if let Err(e) = self.notifier.notify(alert) {
                    tracing::warn!(error = %e, "Could not raise alert notification");
                }
            }
            NotificationPermission::Denied | NotificationPermission::Unsupported => {}
        }
    }

    /// Feed frames from `frames` until it ends or `cancel` fires
    pub async fn run<S>(&self, frames: S, cancel: &CancellationToken)
    where
        S: Stream<Item = String>,
    {
        let mut frames = std::pin::pin!(frames);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                frame = frames.next() => match frame {
                    Some(text) => self.handle_frame(&text).await,
                    None => break,
                },
            }
        }
    }

    async fn handle_frame(&self, text: &str) {
        if let Err(e) = self.handle_message(text).await {
            tracing::warn!(error = %e, "Dropping malformed alert frame");
        }
    }

    /// Keep a websocket connection to `alerts.ws_url` open until cancelled
    ///
    /// Reconnects with capped exponential backoff. The attempt counter
    /// resets after every connection that was established.
    pub async fn connect(self: Arc<Self>, cancel: CancellationToken) {
        let initial = self.config.reconnect_initial();
        let max = self.config.reconnect_max();
        let mut attempt: u32 = 0;

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                result = self.connect_and_read(&cancel) => {
                    match result {
                        Ok(()) => {
                            tracing::info!("Alert stream closed");
                            attempt = 0;
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, attempt, "Alert stream error");
                        }
                    }
                }
            }

            if cancel.is_cancelled() {
                break;
            }

            let delay = reconnect_delay(attempt, initial, max);
            tracing::info!(delay_ms = delay.as_millis() as u64, attempt, "Reconnecting to alert stream");
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(delay) => {}
            }
            attempt = attempt.saturating_add(1);
        }

        tracing::debug!("Alert listener exiting");
    }

    async fn connect_and_read(&self, cancel: &CancellationToken) -> Result<(), AlertError> {
        tracing::info!(url = %self.config.ws_url, "Connecting to alert stream");

        let (stream, _response) = tokio_tungstenite::connect_async(self.config.ws_url.as_str())
            .await
            .map_err(|e| AlertError::Connect(e.to_string()))?;

        tracing::info!("Alert stream connected");
        let (_write, mut read) = stream.split();

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Ok(()),
                frame = read.next() => match frame {
                    Some(Ok(Message::Text(text))) => self.handle_frame(text.as_str()).await,
                    Some(Ok(Message::Close(frame))) => {
                        if let Some(cf) = frame {
                            tracing::info!(code = %cf.code, reason = %cf.reason, "Alert stream close frame");
                        }
                        return Ok(());
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(AlertError::Connect(e.to_string())),
                    None => return Ok(()),
                },
            }
        }
    }
}
