//! Training goal type definitions.
//!
//! T020: Define TrainingGoals singleton record and fitness levels

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Self-assessed fitness level of the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FitnessLevel {
    /// New to structured marathon training
    #[default]
    Beginner,
    /// Comfortable with regular weekly mileage
    Intermediate,
    /// Experienced racer with a solid base
    Advanced,
}

impl FitnessLevel {
    /// All fitness levels, in display order.
    pub const ALL: [FitnessLevel; 3] = [
        FitnessLevel::Beginner,
        FitnessLevel::Intermediate,
        FitnessLevel::Advanced,
    ];

    /// Get display label.
    pub fn label(&self) -> &'static str {
        match self {
            FitnessLevel::Beginner => "Beginner",
            FitnessLevel::Intermediate => "Intermediate",
            FitnessLevel::Advanced => "Advanced",
        }
    }
}

impl std::fmt::Display for FitnessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Long-term training goals, kept as a single record.
///
/// Replaced wholesale on every save. No history is retained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingGoals {
    /// Overall marathon goal, free text (e.g. "Under 5 hours", "4:30:00")
    pub goal_time: String,
    /// Current comfortable running pace (e.g. "7:30 min/km")
    pub comfortable_pace: String,
    /// Current fastest sustainable pace (e.g. "6:30 min/km")
    pub fastest_pace: String,
    /// Self-assessed fitness level
    pub fitness_level: FitnessLevel,
    /// Target marathon date, if one is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marathon_date: Option<NaiveDate>,
    /// Long-term notes or training philosophy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_term_notes: Option<String>,
}

impl Default for TrainingGoals {
    fn default() -> Self {
        Self {
            goal_time: "Under 5 hours".to_string(),
            comfortable_pace: "7:30 min/km".to_string(),
            fastest_pace: "6:30 min/km".to_string(),
            fitness_level: FitnessLevel::Beginner,
            marathon_date: None,
            long_term_notes: Some(
                "Focus on building a consistent base and enjoying the journey!".to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_goals() {
        let goals = TrainingGoals::default();

        assert_eq!(goals.goal_time, "Under 5 hours");
        assert_eq!(goals.comfortable_pace, "7:30 min/km");
        assert_eq!(goals.fastest_pace, "6:30 min/km");
        assert_eq!(goals.fitness_level, FitnessLevel::Beginner);
        assert!(goals.marathon_date.is_none());
        assert!(goals.long_term_notes.is_some());
    }

    #[test]
    fn test_goals_serialization_round_trip() {
        let mut goals = TrainingGoals::default();
        goals.marathon_date = NaiveDate::from_ymd_opt(2025, 4, 21);
        goals.fitness_level = FitnessLevel::Intermediate;

        let json = serde_json::to_string(&goals).unwrap();
        let parsed: TrainingGoals = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, goals);
    }

    #[test]
    fn test_goals_parse_with_missing_optionals() {
        let json = r#"{
            "goalTime": "4:00:00",
            "comfortablePace": "6:00 min/km",
            "fastestPace": "5:00 min/km",
            "fitnessLevel": "Advanced"
        }"#;

        let parsed: TrainingGoals = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.fitness_level, FitnessLevel::Advanced);
        assert!(parsed.marathon_date.is_none());
        assert!(parsed.long_term_notes.is_none());
    }
}
