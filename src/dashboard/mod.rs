//! Dashboard Refresh Coordination
//!
//! Keeps the dashboard sections in sync with the backend, periodically and
//! on demand.
//!
//! ## Architecture
//!
//! - **RefreshCoordinator**: owns the timer, fans out one fetch per section,
//!   tracks section state and drives the render surface
//! - **Sections**: independently fetched regions, each with its own
//!   sequence counter so late responses can be recognised and dropped
//! - **Chart lifecycle**: the production chart is built once, updated in
//!   place, and destroyed only at teardown
//!
//! ## Refresh cycle
//!
//! 1. Every section goes to `Loading`, its placeholder is rendered and its
//!    sequence number is bumped
//! 2. All section fetches run concurrently
//! 3. Each completion is applied on its own, unless a newer request for the
//!    same section was dispatched in the meantime
//! 4. A failure only marks its own section `Failed`

mod chart;
mod coordinator;
mod section;

pub use chart::ChartPhase;
pub use coordinator::{CycleReport, DashboardSnapshot, RefreshCoordinator};
pub use section::{Section, SectionData, SectionSnapshot, SectionState};
