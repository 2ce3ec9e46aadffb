//! Calendar schedules

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A calendar entry from `GET /schedules`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: i64,
    pub title: String,
    #[serde(with = "super::timestamp")]
    pub start: DateTime<Utc>,
    #[serde(default, with = "super::timestamp::option", skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beehive_id: Option<i64>,
}

/// Payload for `POST /schedules`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewSchedule {
    pub title: String,
    #[serde(with = "super::timestamp")]
    pub start: DateTime<Utc>,
    #[serde(with = "super::timestamp::option", skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beehive_id: Option<i64>,
}

impl NewSchedule {
    pub fn new(title: impl Into<String>, start: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            start,
            end: None,
            beehive_id: None,
        }
    }

    /// Builder method: set the end of the slot
    pub fn until(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    /// Builder method: link the schedule to a hive
    pub fn beehive(mut self, beehive_id: i64) -> Self {
        self.beehive_id = Some(beehive_id);
        self
    }
}
