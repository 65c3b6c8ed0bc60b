//! RunPlan - Marathon Training Planner
//!
//! An open-source, self-hosted marathon training planner built in Rust.
//! Provides a calendar and schedule view for logging workouts, long-term
//! goal tracking, AI-assisted weekly plan suggestions, and iCalendar export.

pub mod activities;
pub mod export;
pub mod goals;
pub mod storage;
pub mod suggest;
pub mod ui;

// Re-export commonly used types
pub use activities::types::{Activity, ActivityType};
pub use goals::types::TrainingGoals;
pub use storage::store::PlanStore;
pub use suggest::reviewer::SuggestionReviewer;
