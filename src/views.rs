//! Derived view computations
//!
//! Pure functions evaluated at render time. Nothing here is cached: the same
//! visit list gives a different overdue count an hour later.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Visit, VisitStatus};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Number of planned visits scheduled strictly before `now`
pub fn overdue_count(visits: &[Visit], now: DateTime<Utc>) -> usize {
    visits.iter().filter(|v| v.is_overdue(now)).count()
}

/// Day distance between a target date and now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeDay {
    Today,
    Tomorrow,
    Yesterday,
    InDays(u64),
    DaysAgo(u64),
}

impl RelativeDay {
    /// Build from a signed day difference (positive = future)
    pub fn from_days(days: i64) -> Self {
        match days {
            0 => RelativeDay::Today,
            1 => RelativeDay::Tomorrow,
            -1 => RelativeDay::Yesterday,
            d if d > 0 => RelativeDay::InDays(d.unsigned_abs()),
            d => RelativeDay::DaysAgo(d.unsigned_abs()),
        }
    }
}

impl std::fmt::Display for RelativeDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelativeDay::Today => write!(f, "today"),
            RelativeDay::Tomorrow => write!(f, "tomorrow"),
            RelativeDay::Yesterday => write!(f, "yesterday"),
            RelativeDay::InDays(n) => write!(f, "in {} days", n),
            RelativeDay::DaysAgo(n) => write!(f, "{} days ago", n),
        }
    }
}

/// Relative label for `target` as seen from `now`
///
/// The day count is the millisecond difference divided by one day, rounded
/// towards positive infinity: a target one hour ahead already reads as
/// "tomorrow", one hour behind still reads as "today".
pub fn relative_date_label(target: DateTime<Utc>, now: DateTime<Utc>) -> RelativeDay {
    let diff = (target - now).num_milliseconds();
    RelativeDay::from_days(ceil_div(diff, MILLIS_PER_DAY))
}

fn ceil_div(numerator: i64, denominator: i64) -> i64 {
    let quotient = numerator / denominator;
    if numerator % denominator > 0 {
        quotient + 1
    } else {
        quotient
    }
}

/// Display category for a visit status badge
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Primary,
    Info,
    Warning,
    Success,
    Danger,
    Secondary,
}

impl StatusColor {
    /// Category used for anything the mapping does not recognise
    pub const FALLBACK: StatusColor = StatusColor::Secondary;

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusColor::Primary => "primary",
            StatusColor::Info => "info",
            StatusColor::Warning => "warning",
            StatusColor::Success => "success",
            StatusColor::Danger => "danger",
            StatusColor::Secondary => "secondary",
        }
    }
}

impl std::fmt::Display for StatusColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl VisitStatus {
    pub fn color(&self) -> StatusColor {
        match self {
            VisitStatus::Planned => StatusColor::Primary,
            VisitStatus::Approved => StatusColor::Info,
            VisitStatus::InProgress => StatusColor::Warning,
            VisitStatus::Completed => StatusColor::Success,
            VisitStatus::Cancelled => StatusColor::Danger,
            VisitStatus::Postponed => StatusColor::Secondary,
            VisitStatus::Unknown => StatusColor::FALLBACK,
        }
    }
}

/// Map a raw status string to its display category
pub fn status_color(status: &str) -> StatusColor {
    status
        .parse::<VisitStatus>()
        .unwrap_or(VisitStatus::Unknown)
        .color()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BeehiveRef;
    use chrono::Duration;

    fn visit(offset: Duration, status: VisitStatus, now: DateTime<Utc>) -> Visit {
        Visit::new(
            1,
            BeehiveRef {
                id: 1,
                name: "R1".to_string(),
            },
            "ROUTINE_CHECK",
            now + offset,
            status,
        )
    }

    #[test]
    fn test_overdue_count() {
        let now = Utc::now();
        let visits = vec![
            visit(-Duration::days(2), VisitStatus::Planned, now),
            visit(-Duration::minutes(1), VisitStatus::Planned, now),
            visit(-Duration::days(2), VisitStatus::Approved, now),
            visit(Duration::days(1), VisitStatus::Planned, now),
        ];
        assert_eq!(overdue_count(&visits, now), 2);
    }

    #[test]
    fn test_overdue_count_empty_and_future() {
        let now = Utc::now();
        assert_eq!(overdue_count(&[], now), 0);

        let future: Vec<Visit> = (1..5)
            .map(|d| visit(Duration::days(d), VisitStatus::Planned, now))
            .collect();
        assert_eq!(overdue_count(&future, now), 0);
    }

    #[test]
    fn test_relative_labels() {
        let now = Utc::now();
        assert_eq!(relative_date_label(now, now).to_string(), "today");
        assert_eq!(relative_date_label(now + Duration::days(1), now).to_string(), "tomorrow");
        assert_eq!(relative_date_label(now - Duration::days(1), now).to_string(), "yesterday");
        assert_eq!(relative_date_label(now + Duration::days(5), now).to_string(), "in 5 days");
        assert_eq!(relative_date_label(now - Duration::days(3), now).to_string(), "3 days ago");
    }

    #[test]
    fn test_relative_label_rounds_up() {
        let now = Utc::now();
        assert_eq!(
            relative_date_label(now + Duration::hours(1), now),
            RelativeDay::Tomorrow
        );
        assert_eq!(relative_date_label(now - Duration::hours(1), now), RelativeDay::Today);
        assert_eq!(
            relative_date_label(now - Duration::hours(25), now),
            RelativeDay::Yesterday
        );
        assert_eq!(
            relative_date_label(now + Duration::hours(49), now),
            RelativeDay::InDays(3)
        );
    }

    #[test]
    fn test_status_colors_are_total() {
        assert_eq!(status_color("PLANNED"), StatusColor::Primary);
        assert_eq!(status_color("APPROVED"), StatusColor::Info);
        assert_eq!(status_color("IN_PROGRESS"), StatusColor::Warning);
        assert_eq!(status_color("COMPLETED"), StatusColor::Success);
        assert_eq!(status_color("CANCELLED"), StatusColor::Danger);
        assert_eq!(status_color("POSTPONED"), StatusColor::Secondary);

        for status in VisitStatus::all() {
            let _ = status.color();
        }
    }

    #[test]
    fn test_unknown_status_falls_back() {
        assert_eq!(status_color("ARCHIVED"), StatusColor::FALLBACK);
        assert_eq!(status_color(""), StatusColor::FALLBACK);
        assert_eq!(status_color("planned"), StatusColor::FALLBACK);
        assert_eq!(status_color("Completed"), StatusColor::FALLBACK);
        assert_eq!(VisitStatus::Unknown.color(), StatusColor::FALLBACK);
    }
}
