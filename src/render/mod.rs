//! Rendering surface
//!
//! The crate never produces markup. It hands structured data to a
//! [`RenderSurface`]: a browser binding, a TUI, or the [`TracingSurface`]
//! used by the headless binary.
//!
//! Regions of the surface are optional. Before touching one, callers ask
//! [`RenderSurface::has_target`]; an absent region is skipped silently.

mod tracing_surface;

pub use tracing_surface::TracingSurface;

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::models::{Alert, Beehive, DashboardStats, ProductionSeries, Schedule, Visit};

/// A region of the rendering surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderTarget {
    Statistics,
    RecentVisits,
    HighProduction,
    LowProduction,
    ProductionChart,
    Alerts,
    Calendar,
    Beehives,
    Banner,
}

/// Receives everything the dashboard displays
///
/// Calls are synchronous and must not block: they run on the refresh path.
pub trait RenderSurface: Send + Sync {
    /// Whether the region exists. Absent regions are never rendered into.
    fn has_target(&self, _target: RenderTarget) -> bool {
        true
    }

    /// Replace a region's content with a loading placeholder
    fn render_loading(&self, target: RenderTarget);

    /// Replace a region's content with an inline error message
    fn render_error(&self, target: RenderTarget, message: &str);

    fn render_statistics(&self, stats: &DashboardStats);

    /// Planned visits; `now` is the evaluation time for relative labels
    fn render_recent_visits(&self, visits: &[Visit], now: DateTime<Utc>);

    /// Rows of the high or low production table
    fn render_production_table(&self, target: RenderTarget, beehives: &[Beehive]);

    /// Construct the chart. `None` means the surface cannot host one.
    fn create_chart(&self, series: &ProductionSeries) -> Option<Box<dyn ChartHandle>>;

    /// Alert list, most recent first
    fn render_alerts(&self, alerts: &[Alert]);

    fn render_schedules(&self, schedules: &[Schedule]);

    /// Full hive list, one card per hive
    fn render_beehives(&self, beehives: &[Beehive]);

    fn show_banner(&self, banner: &Banner);

    /// Remove the banner with the given kind, if shown
    fn clear_banner(&self, _kind: BannerKind) {}
}

/// A live chart owned by the coordinator
///
/// Updated in place on every refresh; destroyed once, at teardown.
pub trait ChartHandle: Send {
    fn update(&mut self, series: &ProductionSeries);

    fn destroy(self: Box<Self>);
}

/// Page-level message strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
    /// Auto-dismiss delay; `None` keeps the banner until cleared
    pub dismiss_after: Option<Duration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BannerKind {
    Success,
    Warning,
    Error,
}

impl Banner {
    pub fn connection_lost() -> Self {
        Self {
            kind: BannerKind::Warning,
            message: "Connection lost. Some features may be unavailable.".to_string(),
            dismiss_after: None,
        }
    }

    pub fn connection_restored() -> Self {
        Self {
            kind: BannerKind::Success,
            message: "Connection restored".to_string(),
            dismiss_after: Some(Duration::from_secs(3)),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            message: message.into(),
            dismiss_after: Some(Duration::from_secs(5)),
        }
    }
}
