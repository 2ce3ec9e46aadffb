//! Refresh coordinator

use chrono::Utc;
use futures_util::future::join_all;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::chart::{ChartLifecycle, ChartPhase};
use super::section::{Section, SectionBoard, SectionData, SectionSnapshot, SectionState};
use crate::api::{ApiResult, DashboardApi, FilterSet, VisitQuery};
use crate::config::DashboardConfig;
use crate::connectivity::ConnectivitySignal;
use crate::models::DashboardStats;
use crate::render::{Banner, BannerKind, RenderSurface, RenderTarget};

/// Outcome counts of one refresh cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub applied: usize,
    pub failed: usize,
    /// Responses dropped because a newer request superseded them
    pub discarded: usize,
}

impl CycleReport {
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.discarded == 0
    }
}

enum Outcome {
    Applied,
    Failed,
    Discarded,
}

/// Read-only view of the coordinator
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub sections: Vec<SectionSnapshot>,
    pub chart: ChartPhase,
    /// A periodic timer is currently ticking
    pub running: bool,
    /// Remembered refresh period, kept while offline
    pub interval: Option<Duration>,
    pub online: bool,
    pub disposed: bool,
    pub filters: FilterSet,
}

impl DashboardSnapshot {
    pub fn section(&self, section: Section) -> Option<&SectionSnapshot> {
        self.sections.iter().find(|s| s.section == section)
    }

    pub fn state(&self, section: Section) -> SectionState {
        self.section(section)
            .map(|s| s.state.clone())
            .unwrap_or_default()
    }
}

struct TimerState {
    handle: Option<JoinHandle<()>>,
    interval: Option<Duration>,
    online: bool,
}

/// Keeps the dashboard sections fresh
///
/// Construct with [`RefreshCoordinator::new`], then either call
/// [`start`](Self::start) for periodic refresh or drive it by hand with
/// [`refresh_now`](Self::refresh_now) and [`apply_filters`](Self::apply_filters).
pub struct RefreshCoordinator {
    api: Arc<dyn DashboardApi>,
    surface: Arc<dyn RenderSurface>,
    config: DashboardConfig,
    sections: RwLock<SectionBoard>,
    chart: Mutex<ChartLifecycle>,
    timer: Mutex<TimerState>,
    filters: RwLock<FilterSet>,
    disposed: AtomicBool,
    cycles: AtomicU64,
}

impl RefreshCoordinator {
    pub fn new(
        api: Arc<dyn DashboardApi>,
        surface: Arc<dyn RenderSurface>,
        config: DashboardConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            api,
            surface,
            config,
            sections: RwLock::new(SectionBoard::default()),
            chart: Mutex::new(ChartLifecycle::Idle),
            timer: Mutex::new(TimerState {
                handle: None,
                interval: None,
                online: true,
            }),
            filters: RwLock::new(FilterSet::new()),
            disposed: AtomicBool::new(false),
            cycles: AtomicU64::new(0),
        })
    }

    /// Begin periodic refresh: one cycle now, then one every `interval`
    ///
    /// Returns `false` without doing anything when a timer is already set,
    /// the interval is zero, or the coordinator was disposed.
    pub async fn start(self: &Arc<Self>, interval: Duration) -> bool {
        if interval.is_zero() {
            tracing::warn!("Refusing to start dashboard refresh with a zero interval");
            return false;
        }
        if self.is_disposed() {
            return false;
        }

        let mut timer = self.timer.lock().await;
        if timer.interval.is_some() {
            tracing::debug!("Dashboard refresh already running");
            return false;
        }

        timer.interval = Some(interval);
        if timer.online {
            timer.handle = Some(self.spawn_ticker(interval));
        }

        tracing::info!(
            interval_ms = interval.as_millis() as u64,
            online = timer.online,
            "Dashboard refresh started"
        );
        true
    }

    /// Cancel periodic refresh. In-flight fetches still complete.
    pub async fn stop(&self) {
        let mut timer = self.timer.lock().await;
        let was_set = timer.interval.take().is_some();
        if let Some(handle) = timer.handle.take() {
            handle.abort();
        }
        if was_set {
            tracing::info!("Dashboard refresh stopped");
        }
    }

    /// Run one full cycle over every section, outside the schedule
    pub async fn refresh_now(&self) -> CycleReport {
        let filters = self.filters.read().await.clone();
        self.run_cycle(&Section::ALL, &filters).await
    }

    /// Replace the active filters and reload the data sections with them
    ///
    /// The set stays active for later cycles; an empty set clears it.
    pub async fn apply_filters(&self, filters: FilterSet) -> CycleReport {
        tracing::debug!(filters = filters.len(), "Applying dashboard filters");
        *self.filters.write().await = filters.clone();
        self.run_cycle(&Section::FILTERABLE, &filters).await
    }

    /// React to a backend connectivity edge
    ///
    /// Repeated signals of the same kind are ignored.
    pub async fn on_connectivity(self: &Arc<Self>, signal: ConnectivitySignal) {
        if self.is_disposed() {
            return;
        }

        match signal {
            ConnectivitySignal::Offline => {
                {
                    let mut timer = self.timer.lock().await;
                    if !timer.online {
                        return;
                    }
                    timer.online = false;
                    if let Some(handle) = timer.handle.take() {
                        handle.abort();
                    }
                }

                tracing::warn!("Backend unreachable, automatic refresh paused");
                if self.surface.has_target(RenderTarget::Banner) {
                    self.surface.show_banner(&Banner::connection_lost());
                }
            }
            ConnectivitySignal::Online => {
                let resumed = {
                    let mut timer = self.timer.lock().await;
                    if timer.online {
                        return;
                    }
                    timer.online = true;
                    match timer.interval {
                        Some(interval) => {
                            timer.handle = Some(self.spawn_ticker(interval));
                            true
                        }
                        None => false,
                    }
                };

                tracing::info!(resumed, "Backend reachable again");
                if self.surface.has_target(RenderTarget::Banner) {
                    self.surface.clear_banner(BannerKind::Warning);
                    self.surface.show_banner(&Banner::connection_restored());
                }

                // A resumed ticker fires immediately, which is the one refresh
                if !resumed {
                    self.refresh_now().await;
                }
            }
        }
    }

    /// Tear down: abort the timer and destroy the chart
    ///
    /// Later refreshes and late responses are ignored.
    pub async fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }

        {
            let mut timer = self.timer.lock().await;
            timer.interval = None;
            if let Some(handle) = timer.handle.take() {
                handle.abort();
            }
        }
        self.chart.lock().await.dispose();

        tracing::info!(
            cycles = self.cycles_completed(),
            "Dashboard coordinator disposed"
        );
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        let sections = self.sections.read().await.snapshot();
        let chart = self.chart.lock().await.phase();
        let (running, interval, online) = {
            let timer = self.timer.lock().await;
            (timer.handle.is_some(), timer.interval, timer.online)
        };

        DashboardSnapshot {
            sections,
            chart,
            running,
            interval,
            online,
            disposed: self.is_disposed(),
            filters: self.filters.read().await.clone(),
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// Number of refresh cycles that ran to completion
    pub fn cycles_completed(&self) -> u64 {
        self.cycles.load(Ordering::SeqCst)
    }

    fn spawn_ticker(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let coordinator = Arc::downgrade(self);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                let Some(coordinator) = coordinator.upgrade() else {
                    break;
                };
                if coordinator.is_disposed() {
                    break;
                }

                // Slow fetches must not delay the next tick
                tokio::spawn(async move {
                    let report = coordinator.refresh_now().await;
                    tracing::debug!(
                        applied = report.applied,
                        failed = report.failed,
                        discarded = report.discarded,
                        "Scheduled refresh finished"
                    );
                });
            }
        })
    }

    async fn run_cycle(&self, sections: &[Section], filters: &FilterSet) -> CycleReport {
        if self.is_disposed() {
            return CycleReport::default();
        }

        let dispatched: Vec<(Section, u64)> = {
            let mut board = self.sections.write().await;
            sections
                .iter()
                .map(|&section| {
                    let seq = board.dispatch(section);
                    // The chart keeps its canvas while refreshing
                    let target = section.target();
                    if section != Section::ProductionChart && self.surface.has_target(target) {
                        self.surface.render_loading(target);
                    }
                    (section, seq)
                })
                .collect()
        };

        let outcomes = join_all(
            dispatched
                .into_iter()
                .map(|(section, seq)| self.load_section(section, seq, filters)),
        )
        .await;

        let mut report = CycleReport::default();
        for outcome in outcomes {
            match outcome {
                Outcome::Applied => report.applied += 1,
                Outcome::Failed => report.failed += 1,
                Outcome::Discarded => report.discarded += 1,
            }
        }
        self.cycles.fetch_add(1, Ordering::SeqCst);
        report
    }

    async fn load_section(&self, section: Section, seq: u64, filters: &FilterSet) -> Outcome {
        let result = self.fetch(section, filters).await;
        self.complete(section, seq, result).await
    }

    async fn fetch(&self, section: Section, filters: &FilterSet) -> ApiResult<SectionData> {
        let thresholds = self.config.thresholds();
        let rows = self.config.table_rows;

        match section {
            Section::Statistics => {
                let visits_query = VisitQuery::all().filtered(filters);
                let (beehives, visits) = tokio::try_join!(
                    self.api.list_beehives(filters),
                    self.api.list_visits(&visits_query),
                )?;
                Ok(SectionData::Statistics(DashboardStats::compute(
                    &beehives,
                    &visits,
                    &thresholds,
                    Utc::now(),
                )))
            }
            Section::RecentVisits => {
                let query = VisitQuery::planned(self.config.recent_visits_limit).filtered(filters);
                let visits = self.api.list_visits(&query).await?;
                Ok(SectionData::RecentVisits(visits))
            }
            Section::HighProduction => {
                let mut beehives = self.api.high_production(thresholds.high, filters).await?;
                beehives.truncate(rows);
                Ok(SectionData::HighProduction(beehives))
            }
            Section::LowProduction => {
                let mut beehives = self.api.low_production(thresholds.low, filters).await?;
                beehives.truncate(rows);
                Ok(SectionData::LowProduction(beehives))
            }
            Section::ProductionChart => {
                let series = self.api.production_series().await?;
                Ok(SectionData::ProductionChart(series))
            }
        }
    }

    /// Apply a finished fetch unless it was superseded
    async fn complete(
        &self,
        section: Section,
        seq: u64,
        result: ApiResult<SectionData>,
    ) -> Outcome {
        let mut board = self.sections.write().await;
        if self.is_disposed() {
            tracing::debug!(section = %section, "Ignoring response after dispose");
            return Outcome::Discarded;
        }

        let slot = board.slot_mut(section);
        if slot.latest_seq != seq {
            tracing::debug!(
                section = %section,
                seq,
                latest = slot.latest_seq,
                "Discarding stale section response"
            );
            return Outcome::Discarded;
        }

        match result {
            Ok(data) => {
                self.render(&data).await;
                slot.state = SectionState::Loaded(data);
                slot.last_success = Some(Utc::now());
                Outcome::Applied
            }
            Err(e) => {
                tracing::warn!(section = %section, error = %e, "Section load failed");
                // A live chart keeps showing its last series
                let chart_live = section == Section::ProductionChart
                    && matches!(
                        self.chart.lock().await.phase(),
                        ChartPhase::Constructed | ChartPhase::Updated(_)
                    );
                let target = section.target();
                if !chart_live && self.surface.has_target(target) {
                    self.surface.render_error(target, section.error_message());
                }
                slot.state = SectionState::Failed(section.error_message().to_string());
                Outcome::Failed
            }
        }
    }

    async fn render(&self, data: &SectionData) {
        let surface = self.surface.as_ref();

        match data {
            SectionData::Statistics(stats) => {
                if surface.has_target(RenderTarget::Statistics) {
                    surface.render_statistics(stats);
                }
            }
            SectionData::RecentVisits(visits) => {
                if surface.has_target(RenderTarget::RecentVisits) {
                    surface.render_recent_visits(visits, Utc::now());
                }
            }
            SectionData::HighProduction(beehives) => {
                if surface.has_target(RenderTarget::HighProduction) {
                    surface.render_production_table(RenderTarget::HighProduction, beehives);
                }
            }
            SectionData::LowProduction(beehives) => {
                if surface.has_target(RenderTarget::LowProduction) {
                    surface.render_production_table(RenderTarget::LowProduction, beehives);
                }
            }
            SectionData::ProductionChart(series) => {
                self.chart.lock().await.apply(surface, series);
            }
        }
    }
}

impl Drop for RefreshCoordinator {
    fn drop(&mut self) {
        if let Some(handle) = self.timer.get_mut().handle.take() {
            handle.abort();
        }
        self.chart.get_mut().dispose();
    }
}
