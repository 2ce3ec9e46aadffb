//! Data model for the Smart Bee House dashboard
//!
//! Every type here is a transient, read-only mirror of server state. A fetch
//! response always replaces the previous copy wholesale.
//!
//! - `Beehive` / `ProductionBand`: hives and their production classification
//! - `Visit` / `VisitStatus`: scheduled apiary visits
//! - `ProductionPoint` / `ProductionSeries`: the production chart series
//! - `Alert` / `Severity`: push notifications from the alert stream
//! - `Schedule` / `NewSchedule`: calendar entries
//! - `DashboardStats`: the counters shown at the top of the dashboard

mod alert;
mod beehive;
mod production;
mod schedule;
mod stats;
mod timestamp;
mod visit;

pub use alert::{Alert, Severity};
pub use beehive::{ApiarySite, Beehive, ProductionBand, ProductionThresholds};
pub use production::{ProductionPoint, ProductionSeries};
pub use schedule::{NewSchedule, Schedule};
pub use stats::DashboardStats;
pub use visit::{BeehiveRef, Visit, VisitStatus};
