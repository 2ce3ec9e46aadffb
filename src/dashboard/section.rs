//! Dashboard sections and their state

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::models::{Beehive, DashboardStats, ProductionSeries, Visit};
use crate::render::RenderTarget;

/// Independently fetched region of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Statistics,
    RecentVisits,
    HighProduction,
    LowProduction,
    ProductionChart,
}

impl Section {
    /// Every section, in render order
    pub const ALL: [Section; 5] = [
        Section::Statistics,
        Section::RecentVisits,
        Section::HighProduction,
        Section::LowProduction,
        Section::ProductionChart,
    ];

    /// Sections scoped by the filter set. The chart is global.
    pub const FILTERABLE: [Section; 4] = [
        Section::Statistics,
        Section::RecentVisits,
        Section::HighProduction,
        Section::LowProduction,
    ];

    pub fn target(&self) -> RenderTarget {
        match self {
            Section::Statistics => RenderTarget::Statistics,
            Section::RecentVisits => RenderTarget::RecentVisits,
            Section::HighProduction => RenderTarget::HighProduction,
            Section::LowProduction => RenderTarget::LowProduction,
            Section::ProductionChart => RenderTarget::ProductionChart,
        }
    }

    /// Inline error text shown when the section fails to load
    pub fn error_message(&self) -> &'static str {
        match self {
            Section::Statistics => "Error while loading statistics",
            Section::RecentVisits => "Error while loading visits",
            Section::HighProduction => "Error while loading high production beehives",
            Section::LowProduction => "Error while loading low production beehives",
            Section::ProductionChart => "Error while loading the production chart",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Section::Statistics => write!(f, "statistics"),
            Section::RecentVisits => write!(f, "recent_visits"),
            Section::HighProduction => write!(f, "high_production"),
            Section::LowProduction => write!(f, "low_production"),
            Section::ProductionChart => write!(f, "production_chart"),
        }
    }
}

/// Payload of a loaded section
#[derive(Debug, Clone, PartialEq)]
pub enum SectionData {
    Statistics(DashboardStats),
    RecentVisits(Vec<Visit>),
    HighProduction(Vec<Beehive>),
    LowProduction(Vec<Beehive>),
    ProductionChart(ProductionSeries),
}

/// Lifecycle of one section within the coordinator
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SectionState {
    #[default]
    Idle,
    Loading,
    Loaded(SectionData),
    /// Inline error message shown in place of the section
    Failed(String),
}

impl SectionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SectionState::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SectionState::Failed(_))
    }

    pub fn data(&self) -> Option<&SectionData> {
        match self {
            SectionState::Loaded(data) => Some(data),
            _ => None,
        }
    }
}

/// Read-only copy of a section for views and tests
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSnapshot {
    pub section: Section,
    pub state: SectionState,
    /// Sequence number of the latest dispatched request
    pub sequence: u64,
    pub last_success: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
pub(super) struct SectionSlot {
    pub state: SectionState,
    pub latest_seq: u64,
    pub last_success: Option<DateTime<Utc>>,
}

/// All section slots
#[derive(Debug, Default)]
pub(super) struct SectionBoard {
    slots: HashMap<Section, SectionSlot>,
}

impl SectionBoard {
    pub fn slot_mut(&mut self, section: Section) -> &mut SectionSlot {
        self.slots.entry(section).or_default()
    }

    /// Move the section to `Loading` and hand out the next sequence number
    pub fn dispatch(&mut self, section: Section) -> u64 {
        let slot = self.slot_mut(section);
        slot.latest_seq += 1;
        slot.state = SectionState::Loading;
        slot.latest_seq
    }

    pub fn snapshot(&self) -> Vec<SectionSnapshot> {
        Section::ALL
            .iter()
            .map(|&section| match self.slots.get(&section) {
                Some(slot) => SectionSnapshot {
                    section,
                    state: slot.state.clone(),
                    sequence: slot.latest_seq,
                    last_success: slot.last_success,
                },
                None => SectionSnapshot {
                    section,
                    state: SectionState::Idle,
                    sequence: 0,
                    last_success: None,
                },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_increments_sequence() {
        let mut board = SectionBoard::default();
        assert_eq!(board.dispatch(Section::RecentVisits), 1);
        assert_eq!(board.dispatch(Section::RecentVisits), 2);
        assert_eq!(board.dispatch(Section::Statistics), 1);
        assert!(board.slot_mut(Section::RecentVisits).state.is_loading());
    }

    #[test]
    fn test_snapshot_covers_every_section() {
        let board = SectionBoard::default();
        let snapshot = board.snapshot();
        assert_eq!(snapshot.len(), Section::ALL.len());
        assert!(snapshot.iter().all(|s| s.state == SectionState::Idle));
    }

    #[test]
    fn test_chart_is_not_filterable() {
        assert!(!Section::FILTERABLE.contains(&Section::ProductionChart));
        assert_eq!(Section::ProductionChart.target(), RenderTarget::ProductionChart);
    }
}
