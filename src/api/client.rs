//! Smart Bee House REST API Client
//!
//! HTTP client for the backend endpoints consumed by the dashboard.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::filters::merge_filters;
use super::{ApiError, ApiResult, DashboardApi, FilterSet, VisitQuery};
use crate::models::{Beehive, NewSchedule, ProductionSeries, Schedule, Visit};

/// Backend REST client
pub struct BeehouseClient {
    client: Client,
    config: ClientConfig,
}

/// Configuration for the REST client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API (e.g. "http://localhost:8080/smart-bee-house/api")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/smart-bee-house/api".to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

impl BeehouseClient {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// GET a JSON document
    async fn get_json<T, Q>(&self, path: &str, query: &Q) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.url(path);
        tracing::debug!(url = %url, "GET");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: text,
            });
        }

        let body = response.text().await.map_err(ApiError::from_transport)?;
        Ok(serde_json::from_str(&body)?)
    }

    /// POST a JSON document, ignoring the response body
    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> ApiResult<()> {
        let url = self.url(path);
        tracing::debug!(url = %url, "POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(ApiError::Status {
                status: status.as_u16(),
                message: text,
            })
        }
    }
}

fn threshold_query(threshold: f64, filters: &FilterSet) -> Vec<(String, String)> {
    merge_filters(
        vec![("threshold".to_string(), format_threshold(threshold))],
        filters,
    )
}

/// Whole thresholds are sent without a fractional part (`5000`, not `5000.0`)
fn format_threshold(threshold: f64) -> String {
    if threshold.fract() == 0.0 {
        format!("{:.0}", threshold)
    } else {
        threshold.to_string()
    }
}

#[async_trait]
impl DashboardApi for BeehouseClient {
    async fn list_beehives(&self, filters: &FilterSet) -> ApiResult<Vec<Beehive>> {
        self.get_json("/beehives", &filters.pairs()).await
    }

    async fn list_visits(&self, query: &VisitQuery) -> ApiResult<Vec<Visit>> {
        self.get_json("/visits", &query.pairs()).await
    }

    async fn high_production(&self, threshold: f64, filters: &FilterSet) -> ApiResult<Vec<Beehive>> {
        self.get_json("/beehives/high-production", &threshold_query(threshold, filters))
            .await
    }

    async fn low_production(&self, threshold: f64, filters: &FilterSet) -> ApiResult<Vec<Beehive>> {
        self.get_json("/beehives/low-production", &threshold_query(threshold, filters))
            .await
    }

    async fn production_series(&self) -> ApiResult<ProductionSeries> {
        self.get_json("/statistics/production", &[] as &[(&str, &str)])
            .await
    }

    async fn list_schedules(&self) -> ApiResult<Vec<Schedule>> {
        self.get_json("/schedules", &[] as &[(&str, &str)]).await
    }

    async fn create_schedule(&self, schedule: &NewSchedule) -> ApiResult<()> {
        self.post_json("/schedules", schedule).await
    }
}
