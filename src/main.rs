//! Beehouse dashboard
//!
//! Headless dashboard runner: refreshes every section on a timer, follows
//! backend connectivity and streams alerts until Ctrl-C. Everything it would
//! display is written to the log.
//!
//! # Configuration
//!
//! Read from `BEEHOUSE_CONFIG`, `<config dir>/beehouse/config.toml` or
//! `./config.toml`, with `BEEHOUSE_*` environment overrides. `RUST_LOG`
//! overrides `logging.level`.

use anyhow::Context;
use beehouse::alerts::{AlertListener, LogNotifier, NoopNotifier, Notifier};
use beehouse::api::{BeehouseClient, DashboardApi, FilterSet};
use beehouse::beehives::BeehiveList;
use beehouse::config::Config;
use beehouse::connectivity::ConnectivityProbe;
use beehouse::dashboard::RefreshCoordinator;
use beehouse::logging::init_logging;
use beehouse::render::{Banner, RenderSurface, RenderTarget, TracingSurface};
use beehouse::schedules::ScheduleBook;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    init_logging(&config.logging).context("Failed to initialise logging")?;

    tracing::info!("Beehouse dashboard v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(api = %config.api.base_url, "Backend API");

    let client: Arc<dyn DashboardApi> = Arc::new(
        BeehouseClient::new(config.api.client_config()).context("Failed to build HTTP client")?,
    );
    let surface: Arc<dyn RenderSurface> = Arc::new(TracingSurface::new(config.dashboard.table_rows));
    let cancel = CancellationToken::new();

    // Calendar
    let schedules = ScheduleBook::new(Arc::clone(&client), Arc::clone(&surface));
    if let Err(e) = schedules.load().await {
        tracing::warn!(error = %e, "Could not load schedules");
        if surface.has_target(RenderTarget::Banner) {
            surface.show_banner(&Banner::error(e.user_message()));
        }
    }

    // Hive list
    let beehives = BeehiveList::new(Arc::clone(&client), Arc::clone(&surface));
    if let Err(e) = beehives.load(&FilterSet::new()).await {
        tracing::warn!(error = %e, "Could not load beehives");
    }

    // Dashboard sections
    let dashboard = RefreshCoordinator::new(
        Arc::clone(&client),
        Arc::clone(&surface),
        config.dashboard.clone(),
    );
    if !dashboard.start(config.dashboard.refresh_interval()).await {
        anyhow::bail!(
            "Dashboard refresh could not start (interval {} ms)",
            config.dashboard.refresh_interval_ms
        );
    }

    let probe = ConnectivityProbe::new(Arc::clone(&client), config.dashboard.probe_interval());
    let probe_task = tokio::spawn(probe.run(Arc::clone(&dashboard), cancel.clone()));

    // Alert stream
    let alerts_task = if config.alerts.enabled {
        let notifier: Arc<dyn Notifier> = if config.alerts.notifications {
            Arc::new(LogNotifier)
        } else {
            Arc::new(NoopNotifier)
        };
        let listener = Arc::new(AlertListener::new(
            config.alerts.clone(),
            Arc::clone(&surface),
            notifier,
        ));
        Some(tokio::spawn(listener.connect(cancel.clone())))
    } else {
        tracing::info!("Alert stream disabled");
        None
    };

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;

    tracing::info!("Shutting down...");
    cancel.cancel();
    dashboard.dispose().await;

    probe_task.await.context("Connectivity probe panicked")?;
    if let Some(task) = alerts_task {
        task.await.context("Alert listener panicked")?;
    }

    tracing::info!(
        cycles = dashboard.cycles_completed(),
        "Beehouse shutdown complete"
    );
    Ok(())
}
