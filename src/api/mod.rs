//! Backend REST API
//!
//! The coordinator never talks to `reqwest` directly: it goes through the
//! [`DashboardApi`] trait, implemented here by [`BeehouseClient`] and by
//! in-memory fakes in tests.
//!
//! ## Endpoints
//!
//! - `GET  /beehives`
//! - `GET  /visits?status=&limit=`
//! - `GET  /beehives/high-production?threshold=`
//! - `GET  /beehives/low-production?threshold=`
//! - `GET  /statistics/production`
//! - `GET  /schedules`, `POST /schedules`

mod client;
mod error;
mod filters;

pub use client::{BeehouseClient, ClientConfig};
pub use error::{ApiError, ApiResult};
pub use filters::{FilterSet, VisitQuery};

use async_trait::async_trait;

use crate::models::{Beehive, NewSchedule, ProductionSeries, Schedule, Visit};

/// Read-mostly view of the Smart Bee House backend
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// All hives, narrowed by the active filters
    async fn list_beehives(&self, filters: &FilterSet) -> ApiResult<Vec<Beehive>>;

    /// Visits matching the query
    async fn list_visits(&self, query: &VisitQuery) -> ApiResult<Vec<Visit>>;

    /// Hives whose honey quantity is above `threshold`
    async fn high_production(&self, threshold: f64, filters: &FilterSet) -> ApiResult<Vec<Beehive>>;

    /// Hives whose honey quantity is below `threshold`
    async fn low_production(&self, threshold: f64, filters: &FilterSet) -> ApiResult<Vec<Beehive>>;

    /// Production time series for the chart
    async fn production_series(&self) -> ApiResult<ProductionSeries>;

    async fn list_schedules(&self) -> ApiResult<Vec<Schedule>>;

    async fn create_schedule(&self, schedule: &NewSchedule) -> ApiResult<()>;

    /// Cheap reachability check used by the connectivity probe
    async fn health(&self) -> ApiResult<()> {
        self.list_schedules().await.map(|_| ())
    }
}
