//! Apiary visits

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A visit as returned by `GET /visits`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub id: i64,
    pub beehive: BeehiveRef,
    #[serde(default)]
    pub reason: String,
    #[serde(with = "super::timestamp")]
    pub scheduled_date: DateTime<Utc>,
    pub status: VisitStatus,
}

/// The subset of a hive embedded in a visit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BeehiveRef {
    pub id: i64,
    pub name: String,
}

impl Visit {
    pub fn new(
        id: i64,
        beehive: BeehiveRef,
        reason: impl Into<String>,
        scheduled_date: DateTime<Utc>,
        status: VisitStatus,
    ) -> Self {
        Self {
            id,
            beehive,
            reason: reason.into(),
            scheduled_date,
            status,
        }
    }

    /// A planned visit whose date is strictly before `now`
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status == VisitStatus::Planned && self.scheduled_date < now
    }
}

/// Visit workflow status
///
/// Unknown values coming from the backend decode to `Unknown` instead of
/// failing the whole list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisitStatus {
    Planned,
    Approved,
    InProgress,
    Completed,
    Cancelled,
    Postponed,
    #[serde(other)]
    Unknown,
}

impl VisitStatus {
    /// Wire representation, as used in `?status=` query parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            VisitStatus::Planned => "PLANNED",
            VisitStatus::Approved => "APPROVED",
            VisitStatus::InProgress => "IN_PROGRESS",
            VisitStatus::Completed => "COMPLETED",
            VisitStatus::Cancelled => "CANCELLED",
            VisitStatus::Postponed => "POSTPONED",
            VisitStatus::Unknown => "UNKNOWN",
        }
    }

    pub fn all() -> &'static [VisitStatus] {
        &[
            VisitStatus::Planned,
            VisitStatus::Approved,
            VisitStatus::InProgress,
            VisitStatus::Completed,
            VisitStatus::Cancelled,
            VisitStatus::Postponed,
        ]
    }
}

/// Exact wire names only, like the serde decoding; anything else is `Unknown`
impl FromStr for VisitStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let status = VisitStatus::all()
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .unwrap_or(VisitStatus::Unknown);
        Ok(status)
    }
}

impl std::fmt::Display for VisitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn hive() -> BeehiveRef {
        BeehiveRef {
            id: 1,
            name: "Ruche 1".to_string(),
        }
    }

    #[test]
    fn test_deserialize_visit() {
        let json = r#"{
            "id": 3,
            "beehive": {"id": 1, "name": "Ruche 1"},
            "reason": "HEALTH_INSPECTION",
            "scheduledDate": "2024-06-01T09:00:00",
            "status": "IN_PROGRESS"
        }"#;
        let visit: Visit = serde_json::from_str(json).unwrap();
        assert_eq!(visit.status, VisitStatus::InProgress);
        assert_eq!(visit.beehive.name, "Ruche 1");
    }

    #[test]
    fn test_unknown_status_does_not_fail() {
        let json = r#"{
            "id": 3,
            "beehive": {"id": 1, "name": "Ruche 1"},
            "scheduledDate": "2024-06-01T09:00:00",
            "status": "ARCHIVED"
        }"#;
        let visit: Visit = serde_json::from_str(json).unwrap();
        assert_eq!(visit.status, VisitStatus::Unknown);
    }

    #[test]
    fn test_is_overdue() {
        let now = Utc::now();
        let past = Visit::new(1, hive(), "", now - Duration::hours(1), VisitStatus::Planned);
        let future = Visit::new(2, hive(), "", now + Duration::hours(1), VisitStatus::Planned);
        let done = Visit::new(3, hive(), "", now - Duration::days(2), VisitStatus::Completed);
        let exact = Visit::new(4, hive(), "", now, VisitStatus::Planned);

        assert!(past.is_overdue(now));
        assert!(!future.is_overdue(now));
        assert!(!done.is_overdue(now));
        assert!(!exact.is_overdue(now));
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("PLANNED".parse::<VisitStatus>().unwrap(), VisitStatus::Planned);
        assert_eq!("planned".parse::<VisitStatus>().unwrap(), VisitStatus::Unknown);
        assert_eq!(" PLANNED".parse::<VisitStatus>().unwrap(), VisitStatus::Unknown);
        assert_eq!("IN_PROGRESS".parse::<VisitStatus>().unwrap(), VisitStatus::InProgress);
        assert_eq!("nope".parse::<VisitStatus>().unwrap(), VisitStatus::Unknown);
    }
}
