//! Activity type definitions.
//!
//! T014: Define Activity record and ActivityType enum

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of training activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ActivityType {
    /// Running session
    #[default]
    Run,
    /// Swimming session (cross-training)
    Swim,
    /// Rest or active recovery day
    Rest,
}

impl ActivityType {
    /// All activity types, in display order.
    pub const ALL: [ActivityType; 3] = [ActivityType::Run, ActivityType::Swim, ActivityType::Rest];

    /// Get display label for the activity type.
    pub fn label(&self) -> &'static str {
        match self {
            ActivityType::Run => "Run",
            ActivityType::Swim => "Swim",
            ActivityType::Rest => "Rest",
        }
    }

    /// Parse a label as produced by `label()`. Returns `None` for anything else.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Run" => Some(ActivityType::Run),
            "Swim" => Some(ActivityType::Swim),
            "Rest" => Some(ActivityType::Rest),
            _ => None,
        }
    }

    /// Whether a distance is meaningful for this activity type.
    pub fn supports_distance(&self) -> bool {
        matches!(self, ActivityType::Run)
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A persisted workout record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Unique identifier
    pub id: Uuid,
    /// Kind of activity
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    /// Calendar date (day granularity, no time of day)
    pub date: NaiveDate,
    /// Total duration in minutes
    #[serde(rename = "durationMinutes")]
    pub duration_minutes: u32,
    /// Distance in kilometers, only meaningful for runs
    #[serde(
        rename = "distanceKm",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub distance_km: Option<f64>,
    /// Free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Activity {
    /// Create a new activity with a freshly generated id.
    pub fn new(
        activity_type: ActivityType,
        date: NaiveDate,
        duration_minutes: u32,
        distance_km: Option<f64>,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            activity_type,
            date,
            // Distance is dropped outright for non-run activities
            distance_km: if activity_type.supports_distance() {
                distance_km
            } else {
                None
            },
            duration_minutes,
            notes,
        }
    }

    /// Whether this activity is on or after the given day.
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.date >= today
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_type_labels_round_trip() {
        for t in ActivityType::ALL {
            assert_eq!(ActivityType::from_label(t.label()), Some(t));
        }
        assert_eq!(ActivityType::from_label("Cycling"), None);
    }

    #[test]
    fn test_new_activity_drops_distance_for_non_runs() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();

        let run = Activity::new(ActivityType::Run, date, 30, Some(5.0), None);
        assert_eq!(run.distance_km, Some(5.0));

        let swim = Activity::new(ActivityType::Swim, date, 45, Some(2.0), None);
        assert_eq!(swim.distance_km, None);
    }

    #[test]
    fn test_activity_serialization_field_names() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        let activity = Activity::new(
            ActivityType::Run,
            date,
            30,
            Some(5.0),
            Some("Easy run".to_string()),
        );

        let json = serde_json::to_string(&activity).unwrap();
        assert!(json.contains("\"type\":\"Run\""));
        assert!(json.contains("\"date\":\"2024-07-15\""));
        assert!(json.contains("\"durationMinutes\":30"));
        assert!(json.contains("\"distanceKm\":5.0"));
    }

    #[test]
    fn test_absent_optionals_are_omitted() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        let rest = Activity::new(ActivityType::Rest, date, 0, None, None);

        let json = serde_json::to_string(&rest).unwrap();
        assert!(!json.contains("distanceKm"));
        assert!(!json.contains("notes"));
    }

    #[test]
    fn test_is_upcoming() {
        let today = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2024, 7, 14).unwrap();

        let past = Activity::new(ActivityType::Run, yesterday, 30, None, None);
        let current = Activity::new(ActivityType::Run, today, 30, None, None);

        assert!(!past.is_upcoming(today));
        assert!(current.is_upcoming(today));
    }
}
