//! Log-backed rendering surface
//!
//! Used by the headless binary: every render call becomes a structured
//! `tracing` event, so the dashboard can run against a real backend with
//! nothing but a terminal.

use chrono::{DateTime, Utc};

use super::{Banner, BannerKind, ChartHandle, RenderSurface, RenderTarget};
use crate::models::{Alert, Beehive, DashboardStats, ProductionSeries, Schedule, Visit};
use crate::views::relative_date_label;

/// Renders into log events
#[derive(Debug, Clone)]
pub struct TracingSurface {
    table_rows: usize,
}

impl TracingSurface {
    pub fn new(table_rows: usize) -> Self {
        Self { table_rows }
    }
}

impl Default for TracingSurface {
    fn default() -> Self {
        Self::new(5)
    }
}

impl RenderSurface for TracingSurface {
    fn render_loading(&self, target: RenderTarget) {
        tracing::debug!(target_region = ?target, "Loading");
    }

    fn render_error(&self, target: RenderTarget, message: &str) {
        tracing::warn!(target_region = ?target, error = message, "Section error");
    }

    fn render_statistics(&self, stats: &DashboardStats) {
        tracing::info!(
            beehives = stats.total_beehives,
            high_production = stats.high_production,
            scheduled_visits = stats.scheduled_visits,
            overdue = stats.overdue_visits,
            "Statistics"
        );
    }

    fn render_recent_visits(&self, visits: &[Visit], now: DateTime<Utc>) {
        if visits.is_empty() {
            tracing::info!("No planned visits");
            return;
        }
        for visit in visits {
            tracing::info!(
                beehive = %visit.beehive.name,
                reason = %visit.reason,
                when = %relative_date_label(visit.scheduled_date, now),
                status = %visit.status,
                color = %visit.status.color(),
                "Planned visit"
            );
        }
    }

    fn render_production_table(&self, target: RenderTarget, beehives: &[Beehive]) {
        if beehives.is_empty() {
            tracing::info!(target_region = ?target, "No beehives in this band");
            return;
        }
        for hive in beehives.iter().take(self.table_rows) {
            tracing::info!(
                target_region = ?target,
                id = hive.id,
                name = %hive.name,
                site = hive.site_label(),
                honey_kg = hive.honey_quantity,
                "Beehive"
            );
        }
    }

    fn create_chart(&self, series: &ProductionSeries) -> Option<Box<dyn ChartHandle>> {
        tracing::info!(points = series.len(), total = series.total(), "Production chart created");
        Some(Box::new(LogChart { updates: 0 }))
    }

    fn render_alerts(&self, alerts: &[Alert]) {
        if let Some(latest) = alerts.first() {
            tracing::info!(
                count = alerts.len(),
                severity = %latest.severity,
                title = %latest.title,
                body = %latest.message,
                "Alerts"
            );
        }
    }

    fn render_schedules(&self, schedules: &[Schedule]) {
        tracing::info!(count = schedules.len(), "Calendar");
    }

    fn render_beehives(&self, beehives: &[Beehive]) {
        if beehives.is_empty() {
            tracing::info!("No beehives");
            return;
        }
        for hive in beehives {
            tracing::info!(
                id = hive.id,
                population = hive.population,
                temperature_c = hive.temperature,
                humidity_pct = hive.humidity,
                "Hive"
            );
        }
    }

    fn show_banner(&self, banner: &Banner) {
        match banner.kind {
            BannerKind::Success => tracing::info!(text = %banner.message, "Banner"),
            BannerKind::Warning => tracing::warn!(text = %banner.message, "Banner"),
            BannerKind::Error => tracing::error!(text = %banner.message, "Banner"),
        }
    }
}

struct LogChart {
    updates: u64,
}

impl ChartHandle for LogChart {
    fn update(&mut self, series: &ProductionSeries) {
        self.updates += 1;
        tracing::debug!(
            points = series.len(),
            total = series.total(),
            updates = self.updates,
            "Production chart updated"
        );
    }

    fn destroy(self: Box<Self>) {
        tracing::debug!(updates = self.updates, "Production chart destroyed");
    }
}
