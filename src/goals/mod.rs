//! Long-term training goals.

pub mod types;

pub use types::{FitnessLevel, TrainingGoals};
