//! In-memory collaborators shared by the unit tests

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::api::{ApiError, ApiResult, DashboardApi, FilterSet, VisitQuery};
use crate::models::{
    Alert, Beehive, BeehiveRef, DashboardStats, NewSchedule, ProductionSeries, Schedule, Visit,
    VisitStatus,
};
use crate::render::{Banner, BannerKind, ChartHandle, RenderSurface, RenderTarget};

pub fn visit(id: i64, status: VisitStatus, days_from_now: i64) -> Visit {
    Visit::new(
        id,
        BeehiveRef {
            id,
            name: format!("Ruche {}", id),
        },
        "ROUTINE_CHECK",
        Utc::now() + ChronoDuration::days(days_from_now),
        status,
    )
}

pub fn series(values: &[f64]) -> ProductionSeries {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| (format!("P{}", i + 1), *v))
        .collect()
}

/// One scripted answer for the recent-visits request
pub struct Scripted {
    pub delay: Duration,
    pub result: Result<Vec<Visit>, ()>,
}

/// Scriptable backend
#[derive(Default)]
pub struct FakeApi {
    pub beehives: Mutex<Vec<Beehive>>,
    pub visits: Mutex<Vec<Visit>>,
    pub schedules: Mutex<Vec<Schedule>>,
    pub production: Mutex<ProductionSeries>,
    /// Answers for planned-visit queries, consumed in call order
    pub recent_visits_script: Mutex<VecDeque<Scripted>>,
    pub fail_beehives: AtomicBool,
    pub fail_production: AtomicBool,
    pub fail_health: AtomicBool,
    pub production_calls: AtomicUsize,
    pub health_calls: AtomicUsize,
    pub last_filters: Mutex<FilterSet>,
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        let api = Self::default();
        *api.beehives.lock().unwrap() = vec![
            Beehive::new(1, "Ruche 1", 7200.0).site(1, "Rucher Nord"),
            Beehive::new(2, "Ruche 2", 3000.0),
            Beehive::new(3, "Ruche 3", 450.0),
        ];
        *api.visits.lock().unwrap() = vec![
            visit(10, VisitStatus::Planned, -2),
            visit(11, VisitStatus::Planned, 3),
            visit(12, VisitStatus::Completed, -5),
        ];
        *api.production.lock().unwrap() = series(&[10.0, 12.5, 9.0]);
        Arc::new(api)
    }

    pub fn script_recent_visits(&self, delay: Duration, result: Result<Vec<Visit>, ()>) {
        self.recent_visits_script
            .lock()
            .unwrap()
            .push_back(Scripted { delay, result });
    }

    pub fn production_calls(&self) -> usize {
        self.production_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DashboardApi for FakeApi {
    async fn list_beehives(&self, filters: &FilterSet) -> ApiResult<Vec<Beehive>> {
        *self.last_filters.lock().unwrap() = filters.clone();
        if self.fail_beehives.load(Ordering::SeqCst) {
            return Err(ApiError::Unavailable);
        }
        Ok(self.beehives.lock().unwrap().clone())
    }

    async fn list_visits(&self, query: &VisitQuery) -> ApiResult<Vec<Visit>> {
        if query.status.is_none() {
            return Ok(self.visits.lock().unwrap().clone());
        }

        let scripted = self.recent_visits_script.lock().unwrap().pop_front();
        match scripted {
            Some(Scripted { delay, result }) => {
                tokio::time::sleep(delay).await;
                result.map_err(|_| ApiError::Timeout)
            }
            None => Ok(self
                .visits
                .lock()
                .unwrap()
                .iter()
                .filter(|v| Some(v.status) == query.status)
                .take(query.limit.unwrap_or(usize::MAX))
                .cloned()
                .collect()),
        }
    }

    async fn high_production(&self, threshold: f64, _filters: &FilterSet) -> ApiResult<Vec<Beehive>> {
        Ok(self
            .beehives
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.honey_quantity > threshold)
            .cloned()
            .collect())
    }

    async fn low_production(&self, threshold: f64, _filters: &FilterSet) -> ApiResult<Vec<Beehive>> {
        Ok(self
            .beehives
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.honey_quantity < threshold)
            .cloned()
            .collect())
    }

    async fn production_series(&self) -> ApiResult<ProductionSeries> {
        self.production_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_production.load(Ordering::SeqCst) {
            return Err(ApiError::Decode("expected value at line 1".to_string()));
        }
        Ok(self.production.lock().unwrap().clone())
    }

    async fn list_schedules(&self) -> ApiResult<Vec<Schedule>> {
        Ok(self.schedules.lock().unwrap().clone())
    }

    async fn create_schedule(&self, schedule: &NewSchedule) -> ApiResult<()> {
        let mut schedules = self.schedules.lock().unwrap();
        let id = schedules.len() as i64 + 1;
        schedules.push(Schedule {
            id,
            title: schedule.title.clone(),
            start: schedule.start,
            end: schedule.end,
            beehive_id: schedule.beehive_id,
        });
        Ok(())
    }

    async fn health(&self) -> ApiResult<()> {
        self.health_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_health.load(Ordering::SeqCst) {
            Err(ApiError::Unavailable)
        } else {
            Ok(())
        }
    }
}

/// Everything a surface was asked to display
#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    Loading(RenderTarget),
    Error(RenderTarget, String),
    Statistics(DashboardStats),
    RecentVisits(Vec<i64>),
    Table(RenderTarget, Vec<i64>),
    ChartCreated(usize),
    ChartUpdated(usize),
    ChartDestroyed,
    Alerts(Vec<String>),
    Schedules(usize),
    Beehives(Vec<i64>),
    Banner(BannerKind),
    BannerCleared(BannerKind),
}

/// Surface that records render calls
#[derive(Default)]
pub struct RecordingSurface {
    pub events: Arc<Mutex<Vec<RenderEvent>>>,
    pub missing: Mutex<HashSet<RenderTarget>>,
}

impl RecordingSurface {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn without(targets: &[RenderTarget]) -> Arc<Self> {
        let surface = Self::default();
        surface.missing.lock().unwrap().extend(targets.iter().copied());
        Arc::new(surface)
    }

    pub fn events(&self) -> Vec<RenderEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, predicate: impl Fn(&RenderEvent) -> bool) -> usize {
        self.events().iter().filter(|e| predicate(e)).count()
    }

    fn push(&self, event: RenderEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl RenderSurface for RecordingSurface {
    fn has_target(&self, target: RenderTarget) -> bool {
        !self.missing.lock().unwrap().contains(&target)
    }

    fn render_loading(&self, target: RenderTarget) {
        self.push(RenderEvent::Loading(target));
    }

    fn render_error(&self, target: RenderTarget, message: &str) {
        self.push(RenderEvent::Error(target, message.to_string()));
    }

    fn render_statistics(&self, stats: &DashboardStats) {
        self.push(RenderEvent::Statistics(*stats));
    }

    fn render_recent_visits(&self, visits: &[Visit], _now: chrono::DateTime<Utc>) {
        self.push(RenderEvent::RecentVisits(visits.iter().map(|v| v.id).collect()));
    }

    fn render_production_table(&self, target: RenderTarget, beehives: &[Beehive]) {
        self.push(RenderEvent::Table(
            target,
            beehives.iter().map(|b| b.id).collect(),
        ));
    }

    fn create_chart(&self, series: &ProductionSeries) -> Option<Box<dyn ChartHandle>> {
        self.push(RenderEvent::ChartCreated(series.len()));
        Some(Box::new(RecordingChart {
            events: Arc::clone(&self.events),
        }))
    }

    fn render_alerts(&self, alerts: &[Alert]) {
        self.push(RenderEvent::Alerts(
            alerts.iter().map(|a| a.title.clone()).collect(),
        ));
    }

    fn render_schedules(&self, schedules: &[Schedule]) {
        self.push(RenderEvent::Schedules(schedules.len()));
    }

    fn render_beehives(&self, beehives: &[Beehive]) {
        self.push(RenderEvent::Beehives(beehives.iter().map(|b| b.id).collect()));
    }

    fn show_banner(&self, banner: &Banner) {
        self.push(RenderEvent::Banner(banner.kind));
    }

    fn clear_banner(&self, kind: BannerKind) {
        self.push(RenderEvent::BannerCleared(kind));
    }
}

struct RecordingChart {
    events: Arc<Mutex<Vec<RenderEvent>>>,
}

impl ChartHandle for RecordingChart {
    fn update(&mut self, series: &ProductionSeries) {
        self.events
            .lock()
            .unwrap()
            .push(RenderEvent::ChartUpdated(series.len()));
    }

    fn destroy(self: Box<Self>) {
        self.events.lock().unwrap().push(RenderEvent::ChartDestroyed);
    }
}
