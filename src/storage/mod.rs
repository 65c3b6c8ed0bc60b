//! Local persistence: configuration and the plan store.

pub mod config;
pub mod store;

pub use config::{AppConfig, SuggestionSettings};
pub use store::PlanStore;
