//! Full beehive list

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::api::{ApiResult, DashboardApi, FilterSet};
use crate::models::Beehive;
use crate::render::{RenderSurface, RenderTarget};

/// Every hive known to the backend, mirrored into the hive list region
pub struct BeehiveList {
    api: Arc<dyn DashboardApi>,
    surface: Arc<dyn RenderSurface>,
    beehives: RwLock<Vec<Beehive>>,
}

impl BeehiveList {
    pub fn new(api: Arc<dyn DashboardApi>, surface: Arc<dyn RenderSurface>) -> Self {
        Self {
            api,
            surface,
            beehives: RwLock::new(Vec::new()),
        }
    }

    /// Fetch the hives matching `filters` and redraw the list
    ///
    /// On failure the previous list is kept.
    pub async fn load(&self, filters: &FilterSet) -> ApiResult<usize> {
        let fetched = self.api.list_beehives(filters).await?;
        let count = fetched.len();

        let mut beehives = self.beehives.write().await;
        *beehives = fetched;
        if self.surface.has_target(RenderTarget::Beehives) {
            self.surface.render_beehives(&beehives);
        }

        tracing::debug!(count, filters = filters.len(), "Beehives loaded");
        Ok(count)
    }

    pub async fn beehives(&self) -> Vec<Beehive> {
        self.beehives.read().await.clone()
    }

    /// Details of one loaded hive
    pub async fn find(&self, id: i64) -> Option<Beehive> {
        self.beehives.read().await.iter().find(|b| b.id == id).cloned()
    }
}
