//! Dashboard counters

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Beehive, ProductionBand, ProductionThresholds, Visit, VisitStatus};
use crate::views::overdue_count;

/// Counters shown in the statistics section
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_beehives: usize,
    pub high_production: usize,
    /// Visits still in the `PLANNED` state
    pub scheduled_visits: usize,
    /// Planned visits whose date has passed
    pub overdue_visits: usize,
}

impl DashboardStats {
    /// Derive the counters from freshly fetched hives and visits
    pub fn compute(
        beehives: &[Beehive],
        visits: &[Visit],
        thresholds: &ProductionThresholds,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            total_beehives: beehives.len(),
            high_production: beehives
                .iter()
                .filter(|b| ProductionBand::classify(b.honey_quantity, thresholds) == ProductionBand::High)
                .count(),
            scheduled_visits: visits
                .iter()
                .filter(|v| v.status == VisitStatus::Planned)
                .count(),
            overdue_visits: overdue_count(visits, now),
        }
    }
}
