//! Backend reachability

use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::api::DashboardApi;
use crate::dashboard::RefreshCoordinator;

/// Connectivity edge delivered to the coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivitySignal {
    Online,
    Offline,
}

/// Polls the backend and reports changes of reachability
///
/// The backend is assumed reachable until a check fails.
pub struct ConnectivityProbe {
    api: Arc<dyn DashboardApi>,
    interval: Duration,
    reachable: bool,
}

impl ConnectivityProbe {
    pub fn new(api: Arc<dyn DashboardApi>, interval: Duration) -> Self {
        Self {
            api,
            interval,
            reachable: true,
        }
    }

    /// Run one health check; returns a signal only when reachability changed
    pub async fn check(&mut self) -> Option<ConnectivitySignal> {
        let reachable = match self.api.health().await {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(error = %e, "Health check failed");
                false
            }
        };

        if reachable == self.reachable {
            return None;
        }
        self.reachable = reachable;

        Some(if reachable {
            ConnectivitySignal::Online
        } else {
            ConnectivitySignal::Offline
        })
    }

    /// Poll every `interval` and forward edges to `coordinator` until cancelled
    pub async fn run(mut self, coordinator: Arc<RefreshCoordinator>, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick is immediate; the backend is presumed up at startup
        ticker.tick().await;

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    if let Some(signal) = self.check().await {
                        tracing::info!(?signal, "Backend connectivity changed");
                        coordinator.on_connectivity(signal).await;
                    }
                }
            }
        }

        tracing::debug!("Connectivity probe exiting");
    }
}
