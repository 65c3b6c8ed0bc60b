//! Suggestion review state machine.
//!
//! T037: Implement the collecting/reviewing phases
//! T038: Track accepted candidates by composite key

use std::collections::HashSet;

use crate::activities::types::Activity;

use super::types::{SuggestError, SuggestedActivity};

/// Phase of the suggestion flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewerPhase {
    /// User is filling in preferences for the week
    #[default]
    CollectingPreferences,
    /// Candidates, an empty state, or an error are on display
    Reviewing,
}

/// State machine for reviewing a batch of suggested activities.
///
/// Accepted candidates stay visible but cannot be accepted twice; tracking is
/// by composite key since the service supplies no stable identifiers. All
/// tracking resets when preferences are edited, resubmitted, or the reviewer
/// is closed.
#[derive(Debug, Default)]
pub struct SuggestionReviewer {
    phase: ReviewerPhase,
    candidates: Vec<SuggestedActivity>,
    added: HashSet<String>,
    error: Option<String>,
    loading: bool,
}

impl SuggestionReviewer {
    /// Create a reviewer in the collecting-preferences phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> ReviewerPhase {
        self.phase
    }

    /// Candidates on display.
    pub fn candidates(&self) -> &[SuggestedActivity] {
        &self.candidates
    }

    /// Error message from the last request, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the candidate at `index` has already been accepted.
    pub fn is_added(&self, index: usize) -> bool {
        self.candidates
            .get(index)
            .is_some_and(|c| self.added.contains(&c.composite_key()))
    }

    /// Begin a request: clear previous results and enter the reviewing phase.
    ///
    /// Resubmission while a request is outstanding is a no-op; the UI keeps
    /// the trigger disabled, this guard backs it up.
    pub fn begin_request(&mut self) {
        if self.loading {
            return;
        }
        self.candidates.clear();
        self.added.clear();
        self.error = None;
        self.loading = true;
        self.phase = ReviewerPhase::Reviewing;
    }

    /// Record the outcome of the outstanding request.
    ///
    /// Success, an empty result, and failure all land in the reviewing phase.
    pub fn complete(&mut self, result: Result<Vec<SuggestedActivity>, SuggestError>) {
        self.loading = false;
        self.phase = ReviewerPhase::Reviewing;
        match result {
            Ok(candidates) => self.candidates = candidates,
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    /// Return to the preferences form, clearing candidates and errors.
    pub fn edit_preferences(&mut self) {
        if self.loading {
            return;
        }
        self.candidates.clear();
        self.added.clear();
        self.error = None;
        self.phase = ReviewerPhase::CollectingPreferences;
    }

    /// Mutable access to a candidate for pre-acceptance edits.
    ///
    /// Already-accepted candidates are frozen; editing one would change its
    /// composite key and allow a second acceptance.
    pub fn candidate_mut(&mut self, index: usize) -> Option<&mut SuggestedActivity> {
        if self.is_added(index) {
            return None;
        }
        self.candidates.get_mut(index)
    }

    /// Accept the candidate at `index`, converting it into an activity.
    ///
    /// Returns `None` when the index is out of range or the candidate was
    /// already accepted, so a double accept persists nothing.
    pub fn accept(&mut self, index: usize) -> Option<Activity> {
        let candidate = self.candidates.get(index)?;
        let key = candidate.composite_key();
        if !self.added.insert(key) {
            return None;
        }
        Some(candidate.clone().into_activity())
    }

    /// Accept every candidate not yet added.
    pub fn accept_all(&mut self) -> Vec<Activity> {
        (0..self.candidates.len())
            .filter_map(|index| self.accept(index))
            .collect()
    }

    /// Reset to the initial state, e.g. when the reviewer is closed.
    ///
    /// An in-flight request is not cancelled; callers that care keep the
    /// reviewer alive until its result lands.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
