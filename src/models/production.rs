//! Production time series for the dashboard chart

use serde::{Deserialize, Serialize};

/// One point of the honey production series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductionPoint {
    /// Period label (day, week or month, as produced by the backend)
    pub date: String,
    /// Honey produced during the period, in kg
    pub quantity: f64,
}

/// Ordered production series, rendered as a labeled line chart
///
/// `GET /statistics/production` answers either with a list of points or with
/// two parallel `labels` / `values` arrays. Both shapes decode here.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct ProductionSeries {
    points: Vec<ProductionPoint>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SeriesPayload {
    Points(Vec<ProductionPoint>),
    Columns { labels: Vec<String>, values: Vec<f64> },
}

impl<'de> Deserialize<'de> for ProductionSeries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let points = match SeriesPayload::deserialize(deserializer)? {
            SeriesPayload::Points(points) => points,
            SeriesPayload::Columns { labels, values } => labels
                .into_iter()
                .zip(values)
                .map(|(date, quantity)| ProductionPoint { date, quantity })
                .collect(),
        };
        Ok(Self { points })
    }
}

impl ProductionSeries {
    pub fn new(points: Vec<ProductionPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[ProductionPoint] {
        &self.points
    }

    /// X-axis labels
    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.date.as_str()).collect()
    }

    /// Y-axis values
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.quantity).collect()
    }

    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.quantity).sum()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl FromIterator<(String, f64)> for ProductionSeries {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            points: iter
                .into_iter()
                .map(|(date, quantity)| ProductionPoint { date, quantity })
                .collect(),
        }
    }
}
