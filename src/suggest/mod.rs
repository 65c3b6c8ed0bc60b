//! AI-assisted weekly plan suggestions.
//!
//! The full round trip: build a prompt from goals and weekly preferences,
//! send it to the generation service, coerce the response into candidates,
//! and review them into persisted activities.

pub mod client;
pub mod parser;
pub mod prompt;
pub mod reviewer;
pub mod types;

pub use client::SuggestionClient;
pub use prompt::{ShiftType, WeekPreferences, WorkDay};
pub use reviewer::{ReviewerPhase, SuggestionReviewer};
pub use types::{SuggestError, SuggestedActivity};
