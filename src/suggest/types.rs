//! Shared suggestion types and error definitions.
//!
//! T030: Create shared types for the suggestion module

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::activities::types::{Activity, ActivityType};

/// Error types for suggestion operations.
#[derive(Debug, Error)]
pub enum SuggestError {
    /// No API key configured in file or environment
    #[error(
        "API key for the suggestion service is not configured. \
         Set it in config.toml or the RUNPLAN_API_KEY environment variable."
    )]
    MissingApiKey,

    /// Quota or rate limit exhausted
    #[error("Failed to fetch suggestions due to API quota limits. Please try again later.")]
    RateLimited,

    /// Generation service reported an error
    #[error("Suggestion service error: {0}")]
    Api(String),

    /// Service could not be reached
    #[error("Could not reach the suggestion service: {0}")]
    Network(String),

    /// Response was not the expected JSON array
    #[error("Suggestion service returned data in an unexpected format: {0}")]
    InvalidFormat(String),
}

/// A service-generated activity proposal awaiting user acceptance.
///
/// Shape-identical to [`Activity`] minus identity; it gains an id only when
/// accepted into the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedActivity {
    /// Kind of activity
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    /// Calendar date
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
    /// Free-text instructions for the session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl SuggestedActivity {
    /// Composite key used to track accepted candidates.
    ///
    /// The service supplies no stable identifier, so equality is by the full
    /// field tuple.
    pub fn composite_key(&self) -> String {
        format!(
            "{}|{}|{}|{}|{}",
            self.date,
            self.activity_type.label(),
            self.duration_minutes,
            self.distance_km.map(|d| d.to_string()).unwrap_or_default(),
            self.notes.as_deref().unwrap_or(""),
        )
    }

    /// Convert the candidate into a persistable activity with a fresh id.
    pub fn into_activity(self) -> Activity {
        Activity::new(
            self.activity_type,
            self.date,
            self.duration_minutes,
            self.distance_km,
            self.notes,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate() -> SuggestedActivity {
        SuggestedActivity {
            activity_type: ActivityType::Run,
            date: NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
            duration_minutes: 45,
            distance_km: Some(5.0),
            notes: Some("Easy run".to_string()),
        }
    }

    #[test]
    fn test_composite_key_distinguishes_fields() {
        let base = candidate();

        let mut other = candidate();
        other.duration_minutes = 46;
        assert_ne!(base.composite_key(), other.composite_key());

        let mut other = candidate();
        other.notes = None;
        assert_ne!(base.composite_key(), other.composite_key());

        assert_eq!(base.composite_key(), candidate().composite_key());
    }

    #[test]
    fn test_into_activity_assigns_identity() {
        let first = candidate().into_activity();
        let second = candidate().into_activity();

        assert_ne!(first.id, second.id);
        assert_eq!(first.date, second.date);
        assert_eq!(first.activity_type, ActivityType::Run);
        assert_eq!(first.distance_km, Some(5.0));
    }

    #[test]
    fn test_rate_limited_message_mentions_quota() {
        let message = SuggestError::RateLimited.to_string();
        assert!(message.contains("quota"));
    }
}
