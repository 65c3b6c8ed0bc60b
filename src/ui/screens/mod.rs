//! UI screens for the application.

pub mod goal_settings;
pub mod planner;

pub use goal_settings::{GoalSettingsAction, GoalSettingsScreen};
pub use planner::{PlannerAction, PlannerScreen, ViewMode};

/// Screen navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Main planner (calendar/schedule)
    #[default]
    Planner,
    /// Long-term goal settings
    GoalSettings,
}
