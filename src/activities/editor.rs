//! Activity editing semantics.
//!
//! T018: Implement ActivityDraft for create/edit flows

use chrono::NaiveDate;
use uuid::Uuid;

use super::types::{Activity, ActivityType};

/// Default duration for a freshly created activity, in minutes.
const DEFAULT_DURATION_MINUTES: u32 = 30;

/// Editable working copy of an activity.
///
/// A draft is bound either to a new activity (no id yet) or to an existing
/// record (id of the record it replaces on save). Canceling an edit simply
/// discards the draft.
#[derive(Debug, Clone)]
pub struct ActivityDraft {
    /// Id of the record being edited, `None` for a new activity
    pub id: Option<Uuid>,
    /// Kind of activity
    pub activity_type: ActivityType,
    /// Calendar date
    pub date: NaiveDate,
    /// Total duration in minutes
    pub duration_minutes: u32,
    /// Distance in kilometers, only kept while the type is Run
    pub distance_km: Option<f64>,
    /// Free-text notes
    pub notes: String,
}

impl ActivityDraft {
    /// Create a draft for a new activity on the given date.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: None,
            activity_type: ActivityType::Run,
            date,
            duration_minutes: DEFAULT_DURATION_MINUTES,
            distance_km: None,
            notes: String::new(),
        }
    }

    /// Create a draft pre-filled from an existing activity.
    pub fn edit(activity: &Activity) -> Self {
        Self {
            id: Some(activity.id),
            activity_type: activity.activity_type,
            date: activity.date,
            duration_minutes: activity.duration_minutes,
            distance_km: activity.distance_km,
            notes: activity.notes.clone().unwrap_or_default(),
        }
    }

    /// Whether this draft creates a new record on save.
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Change the activity type, clearing distance when it stops being a run.
    pub fn set_type(&mut self, activity_type: ActivityType) {
        self.activity_type = activity_type;
        if !activity_type.supports_distance() {
            self.distance_km = None;
        }
    }

    /// Build the activity record this draft describes.
    ///
    /// A new draft gets a freshly generated id; an edit keeps the id of the
    /// record it replaces.
    pub fn build(&self) -> Activity {
        let notes = {
            let trimmed = self.notes.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        };

        let mut activity = Activity::new(
            self.activity_type,
            self.date,
            self.duration_minutes,
            self.distance_km,
            notes,
        );
        if let Some(id) = self.id {
            activity.id = id;
        }
        activity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()
    }

    #[test]
    fn test_new_draft_defaults() {
        let draft = ActivityDraft::new(test_date());

        assert!(draft.is_new());
        assert_eq!(draft.activity_type, ActivityType::Run);
        assert_eq!(draft.duration_minutes, DEFAULT_DURATION_MINUTES);
        assert_eq!(draft.distance_km, None);
    }

    #[test]
    fn test_build_assigns_fresh_id_for_new_draft() {
        let draft = ActivityDraft::new(test_date());

        let first = draft.build();
        let second = draft.build();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_build_keeps_id_for_edit() {
        let original = Activity::new(ActivityType::Run, test_date(), 30, Some(5.0), None);

        let mut draft = ActivityDraft::edit(&original);
        draft.duration_minutes = 60;

        let rebuilt = draft.build();
        assert_eq!(rebuilt.id, original.id);
        assert_eq!(rebuilt.duration_minutes, 60);
    }

    #[test]
    fn test_switching_away_from_run_clears_distance() {
        let mut draft = ActivityDraft::new(test_date());
        draft.distance_km = Some(10.0);

        draft.set_type(ActivityType::Swim);
        assert_eq!(draft.distance_km, None);

        // Switching back does not resurrect the old value
        draft.set_type(ActivityType::Run);
        assert_eq!(draft.distance_km, None);
    }

    #[test]
    fn test_build_trims_notes() {
        let mut draft = ActivityDraft::new(test_date());
        draft.notes = "  \n".to_string();
        assert_eq!(draft.build().notes, None);

        draft.notes = "  morning run ".to_string();
        assert_eq!(draft.build().notes.as_deref(), Some("morning run"));
    }
}
