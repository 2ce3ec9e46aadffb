//! Alerts pushed over the alert stream

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single alert event
///
/// Alerts carry no identifier; they are ordered by arrival.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    #[serde(default)]
    pub severity: Severity,
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(with = "super::timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl Alert {
    pub fn new(severity: Severity, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    /// Builder method: set the timestamp
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Alert severity, matching the display categories of the alert list
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Danger,
    #[serde(other)]
    Other,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Success => write!(f, "success"),
            Severity::Warning => write!(f, "warning"),
            Severity::Danger => write!(f, "danger"),
            Severity::Other => write!(f, "other"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_decode_alert_with_millis() {
        let json = r#"{"severity": "danger", "title": "Température", "message": "Ruche 4 > 40°C", "timestamp": 1717236000000}"#;
        let alert: Alert = serde_json::from_str(json).unwrap();
        assert_eq!(alert.severity, Severity::Danger);
        assert_eq!(alert.timestamp, Utc.timestamp_millis_opt(1717236000000).unwrap());
    }

    #[test]
    fn test_decode_alert_unknown_severity() {
        let json = r#"{"severity": "critical", "title": "t", "message": "m", "timestamp": "2024-06-01T10:00:00Z"}"#;
        let alert: Alert = serde_json::from_str(json).unwrap();
        assert_eq!(alert.severity, Severity::Other);
    }

    #[test]
    fn test_decode_alert_missing_title_fails() {
        let json = r#"{"severity": "info", "message": "m", "timestamp": 0}"#;
        assert!(serde_json::from_str::<Alert>(json).is_err());
    }

    #[test]
    fn test_alert_serializes_rfc3339_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
        let alert = Alert::new(Severity::Warning, "Humidité", "Ruche 2 > 80%").at(at);
        let json = serde_json::to_value(&alert).unwrap();
        assert_eq!(json["severity"], "warning");
        assert_eq!(json["timestamp"], "2024-06-01T10:00:00+00:00");

        let back: Alert = serde_json::from_value(json).unwrap();
        assert_eq!(back.timestamp, at);
    }
}
