//! Reusable UI widgets and modals.

pub mod activity_form;
pub mod suggestion_modal;

pub use activity_form::{ActivityFormAction, ActivityFormWidget};
pub use suggestion_modal::{SuggestionAction, SuggestionModalWidget};
