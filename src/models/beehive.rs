//! Beehive records and production classification

use serde::{Deserialize, Serialize};

/// Honey quantity above which a hive counts as high production
pub const DEFAULT_HIGH_PRODUCTION_THRESHOLD: f64 = 5000.0;

/// Honey quantity below which a hive counts as low production
pub const DEFAULT_LOW_PRODUCTION_THRESHOLD: f64 = 1000.0;

/// A beehive as returned by `GET /beehives`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Beehive {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub population: u32,
    /// Internal temperature in °C
    #[serde(default)]
    pub temperature: f64,
    /// Relative humidity in %
    #[serde(default)]
    pub humidity: f64,
    /// Current honey quantity, never negative
    #[serde(default, deserialize_with = "non_negative")]
    pub honey_quantity: f64,
    #[serde(default)]
    pub site: Option<ApiarySite>,
}

/// Apiary site a hive belongs to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiarySite {
    pub id: i64,
    pub name: String,
}

fn non_negative<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    Ok(value.max(0.0))
}

impl Beehive {
    /// Create a hive with the given honey quantity and neutral sensor values
    pub fn new(id: i64, name: impl Into<String>, honey_quantity: f64) -> Self {
        Self {
            id,
            name: name.into(),
            population: 0,
            temperature: 0.0,
            humidity: 0.0,
            honey_quantity: honey_quantity.max(0.0),
            site: None,
        }
    }

    /// Builder method: attach the hive to a site
    pub fn site(mut self, id: i64, name: impl Into<String>) -> Self {
        self.site = Some(ApiarySite {
            id,
            name: name.into(),
        });
        self
    }

    /// Site name for table display, `N/A` when the hive has no site
    pub fn site_label(&self) -> &str {
        self.site.as_ref().map(|s| s.name.as_str()).unwrap_or("N/A")
    }

    /// Production band using the default thresholds
    pub fn production_band(&self) -> ProductionBand {
        ProductionBand::classify(self.honey_quantity, &ProductionThresholds::default())
    }
}

/// Honey-quantity thresholds that split hives into production bands
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductionThresholds {
    pub high: f64,
    pub low: f64,
}

impl Default for ProductionThresholds {
    fn default() -> Self {
        Self {
            high: DEFAULT_HIGH_PRODUCTION_THRESHOLD,
            low: DEFAULT_LOW_PRODUCTION_THRESHOLD,
        }
    }
}

/// Production classification derived from the honey quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductionBand {
    /// Strictly above the high threshold
    High,
    Normal,
    /// Strictly below the low threshold
    Low,
}

impl ProductionBand {
    pub fn classify(honey_quantity: f64, thresholds: &ProductionThresholds) -> Self {
        if honey_quantity > thresholds.high {
            ProductionBand::High
        } else if honey_quantity < thresholds.low {
            ProductionBand::Low
        } else {
            ProductionBand::Normal
        }
    }
}
