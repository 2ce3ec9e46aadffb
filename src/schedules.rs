//! Visit calendar

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::api::{ApiResult, DashboardApi};
use crate::models::{NewSchedule, Schedule};
use crate::render::{RenderSurface, RenderTarget};

/// In-memory copy of the backend schedules, mirrored into the calendar
pub struct ScheduleBook {
    api: Arc<dyn DashboardApi>,
    surface: Arc<dyn RenderSurface>,
    schedules: RwLock<Vec<Schedule>>,
}

impl ScheduleBook {
    pub fn new(api: Arc<dyn DashboardApi>, surface: Arc<dyn RenderSurface>) -> Self {
        Self {
            api,
            surface,
            schedules: RwLock::new(Vec::new()),
        }
    }

    /// Fetch every schedule, replace the local list and redraw the calendar
    ///
    /// On failure the previous list is kept.
    pub async fn load(&self) -> ApiResult<usize> {
        let fetched = self.api.list_schedules().await?;
        let count = fetched.len();

        let mut schedules = self.schedules.write().await;
        *schedules = fetched;
        if self.surface.has_target(RenderTarget::Calendar) {
            self.surface.render_schedules(&schedules);
        }

        tracing::debug!(count, "Schedules loaded");
        Ok(count)
    }

    /// Create a schedule on the backend, then reload the calendar
    pub async fn add(&self, schedule: &NewSchedule) -> ApiResult<()> {
        self.api.create_schedule(schedule).await?;
        tracing::info!(title = %schedule.title, start = %schedule.start, "Schedule created");
        self.load().await?;
        Ok(())
    }

    pub async fn schedules(&self) -> Vec<Schedule> {
        self.schedules.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeApi, RecordingSurface, RenderEvent};
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn test_add_then_reload() {
        let api = FakeApi::new();
        let surface = RecordingSurface::new();
        let book = ScheduleBook::new(api.clone(), surface.clone());

        assert_eq!(book.load().await.unwrap(), 0);

        let start = Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap();
        book.add(&NewSchedule::new("Contrôle sanitaire", start).beehive(2))
            .await
            .unwrap();

        let schedules = book.schedules().await;
        assert_eq!(schedules.len(), 1);
        assert_eq!(schedules[0].title, "Contrôle sanitaire");
        assert_eq!(schedules[0].beehive_id, Some(2));
        assert_eq!(
            surface.events(),
            vec![RenderEvent::Schedules(0), RenderEvent::Schedules(1)]
        );
    }

    #[tokio::test]
    async fn test_missing_calendar_is_skipped() {
        let api = FakeApi::new();
        let surface = RecordingSurface::without(&[RenderTarget::Calendar]);
        let book = ScheduleBook::new(api.clone(), surface.clone());

        let start = Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap();
        book.add(&NewSchedule::new("Récolte", start)).await.unwrap();

        assert_eq!(book.schedules().await.len(), 1);
        assert!(surface.events().is_empty());
    }
}
