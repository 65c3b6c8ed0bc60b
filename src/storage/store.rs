//! Local plan storage.
//!
//! T012: Implement JSON-file store for activities and goals
//! T013: Fall back to defaults on missing or corrupt data

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::activities::types::Activity;
use crate::goals::types::TrainingGoals;

/// File name for the persisted activity list.
const ACTIVITIES_FILE: &str = "activities.json";

/// File name for the persisted training goals.
const GOALS_FILE: &str = "goals.json";

/// Storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("No activity with id {0}")]
    NotFound(Uuid),
}

/// Local store for activities and training goals.
///
/// Keeps both record sets in memory and rewrites the backing JSON file in
/// full on every mutation. Corrupt or missing files load as an empty list or
/// default goals rather than failing.
pub struct PlanStore {
    data_dir: PathBuf,
    activities: Vec<Activity>,
    goals: TrainingGoals,
}

impl PlanStore {
    /// Open the store rooted at the given data directory.
    pub fn open(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let activities = load_or_default(&data_dir.join(ACTIVITIES_FILE));
        let goals = load_or_default(&data_dir.join(GOALS_FILE));

        Self {
            data_dir,
            activities,
            goals,
        }
    }

    /// All persisted activities, unordered.
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Activities sorted by date ascending.
    pub fn sorted_activities(&self) -> Vec<Activity> {
        let mut sorted = self.activities.clone();
        sorted.sort_by_key(|a| a.date);
        sorted
    }

    /// Look up an activity by id.
    pub fn activity(&self, id: Uuid) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == id)
    }

    /// The persisted training goals.
    pub fn goals(&self) -> &TrainingGoals {
        &self.goals
    }

    /// Append a new activity and persist.
    pub fn add_activity(&mut self, activity: Activity) -> Result<(), StoreError> {
        self.activities.push(activity);
        self.persist_activities()
    }

    /// Replace the activity with the same id and persist.
    pub fn update_activity(&mut self, activity: Activity) -> Result<(), StoreError> {
        let slot = self
            .activities
            .iter_mut()
            .find(|a| a.id == activity.id)
            .ok_or(StoreError::NotFound(activity.id))?;
        *slot = activity;
        self.persist_activities()
    }

    /// Delete the activity with the given id and persist.
    pub fn delete_activity(&mut self, id: Uuid) -> Result<(), StoreError> {
        let before = self.activities.len();
        self.activities.retain(|a| a.id != id);
        if self.activities.len() == before {
            return Err(StoreError::NotFound(id));
        }
        self.persist_activities()
    }

    /// Replace the training goals wholesale and persist.
    pub fn set_goals(&mut self, goals: TrainingGoals) -> Result<(), StoreError> {
        self.goals = goals;
        write_json(&self.data_dir.join(GOALS_FILE), &self.goals)
    }

    fn persist_activities(&self) -> Result<(), StoreError> {
        write_json(&self.data_dir.join(ACTIVITIES_FILE), &self.activities)
    }
}

/// Load a JSON value from disk, falling back to its default on any failure.
fn load_or_default<T>(path: &Path) -> T
where
    T: serde::de::DeserializeOwned + Default,
{
    if !path.exists() {
        return T::default();
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("Failed to read {}: {}, using defaults", path.display(), e);
            return T::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Failed to parse {}: {}, using defaults", path.display(), e);
            T::default()
        }
    }
}

/// Write a JSON value to disk, creating the parent directory if needed.
fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| StoreError::IoError(e.to_string()))?;
    }

    let content =
        serde_json::to_string_pretty(value).map_err(|e| StoreError::SerializeError(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| StoreError::IoError(e.to_string()))?;

    Ok(())
}
