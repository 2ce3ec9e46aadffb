//! # Beehouse
//!
//! Dashboard client for the Smart Bee House beekeeping backend: keeps the
//! dashboard sections fresh, streams alerts and manages the visit calendar.
//!
//! ## Features
//!
//! - **Refresh coordination**: periodic and on-demand reloads of every
//!   dashboard section, fetched concurrently and failing independently
//! - **Staleness protection**: late responses superseded by a newer request
//!   are dropped
//! - **Connectivity awareness**: automatic refresh pauses while the backend
//!   is unreachable and resumes when it comes back
//! - **Alert stream**: websocket listener with a bounded alert log and
//!   auto-reconnect
//!
//! ## Modules
//!
//! - [`dashboard`]: Refresh coordinator and section state
//! - [`alerts`]: Alert stream listener
//! - [`api`]: Backend REST client
//! - [`beehives`]: Full hive list
//! - [`render`]: Rendering surface abstraction
//! - [`views`]: Derived view computations
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use beehouse::api::BeehouseClient;
//! use beehouse::config::Config;
//! use beehouse::dashboard::RefreshCoordinator;
//! use beehouse::render::TracingSurface;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let client = Arc::new(BeehouseClient::new(config.api.client_config())?);
//!     let surface = Arc::new(TracingSurface::default());
//!
//!     let dashboard = RefreshCoordinator::new(client, surface, config.dashboard.clone());
//!     dashboard.start(config.dashboard.refresh_interval()).await;
//!
//!     let report = dashboard.refresh_now().await;
//!     println!("{} sections refreshed", report.applied);
//!
//!     dashboard.dispose().await;
//!     Ok(())
//! }
//! ```

pub mod alerts;
pub mod api;
pub mod beehives;
pub mod config;
pub mod connectivity;
pub mod dashboard;
pub mod logging;
pub mod models;
pub mod render;
pub mod schedules;
pub mod views;

#[cfg(test)]
pub(crate) mod testing;

pub use alerts::{AlertError, AlertListener, AlertLog, NotificationPermission, Notifier};
pub use api::{ApiError, ApiResult, BeehouseClient, DashboardApi, FilterSet, VisitQuery};
pub use beehives::BeehiveList;
pub use config::{Config, ConfigError};
pub use connectivity::{ConnectivityProbe, ConnectivitySignal};
pub use dashboard::{CycleReport, DashboardSnapshot, RefreshCoordinator, Section, SectionState};
pub use render::{Banner, RenderSurface, RenderTarget, TracingSurface};
pub use schedules::ScheduleBook;
