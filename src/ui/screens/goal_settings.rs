//! Goal settings screen implementation.
//!
//! T054: Implement the training goals form with save/cancel

use chrono::NaiveDate;
use egui::{RichText, Ui};

use crate::goals::types::{FitnessLevel, TrainingGoals};

/// Action requested from the goal settings screen.
#[derive(Debug, Clone, PartialEq)]
pub enum GoalSettingsAction {
    /// Replace the persisted goals with the edited record
    Save(TrainingGoals),
    /// Discard edits and return to the planner
    Cancel,
}

/// Goal settings screen state.
pub struct GoalSettingsScreen {
    /// Working copy being edited
    goals: TrainingGoals,
    /// Input buffer for the optional marathon date
    marathon_date_input: String,
    /// Input buffer for the long-term notes
    notes_input: String,
    /// Validation error message
    error_message: Option<String>,
}

impl GoalSettingsScreen {
    /// Create the screen with an empty working copy.
    pub fn new() -> Self {
        Self {
            goals: TrainingGoals::default(),
            marathon_date_input: String::new(),
            notes_input: String::new(),
            error_message: None,
        }
    }

    /// Load the persisted goals into the form.
    pub fn set_goals(&mut self, goals: &TrainingGoals) {
        self.goals = goals.clone();
        self.marathon_date_input = goals
            .marathon_date
            .map(|d| d.to_string())
            .unwrap_or_default();
        self.notes_input = goals.long_term_notes.clone().unwrap_or_default();
        self.error_message = None;
    }

    /// Render the form. Returns an action on save or cancel.
    pub fn show(&mut self, ui: &mut Ui) -> Option<GoalSettingsAction> {
        let mut action = None;

        ui.label(RichText::new("Long-Term Training Goals").size(20.0).strong());
        ui.add_space(12.0);

        egui::Grid::new("goal_settings_grid")
            .num_columns(2)
            .spacing([12.0, 10.0])
            .show(ui, |ui| {
                ui.label("Marathon goal time");
                ui.text_edit_singleline(&mut self.goals.goal_time);
                ui.end_row();

                ui.label("Comfortable pace");
                ui.text_edit_singleline(&mut self.goals.comfortable_pace);
                ui.end_row();

                ui.label("Fastest pace");
                ui.text_edit_singleline(&mut self.goals.fastest_pace);
                ui.end_row();

                ui.label("Fitness level");
                egui::ComboBox::from_id_salt("fitness_level")
                    .selected_text(self.goals.fitness_level.label())
                    .show_ui(ui, |ui| {
                        for level in FitnessLevel::ALL {
                            ui.selectable_value(
                                &mut self.goals.fitness_level,
                                level,
                                level.label(),
                            );
                        }
                    });
                ui.end_row();

                ui.label("Marathon date (optional)");
                ui.horizontal(|ui| {
                    ui.text_edit_singleline(&mut self.marathon_date_input);
                    ui.label(RichText::new("YYYY-MM-DD").weak());
                });
                ui.end_row();
            });

        ui.add_space(8.0);
        ui.label("Long-term notes / philosophy (optional)");
        ui.add(
            egui::TextEdit::multiline(&mut self.notes_input)
                .desired_rows(3)
                .desired_width(f32::INFINITY)
                .hint_text("e.g., Focus on consistency over speed."),
        );

        if let Some(ref message) = self.error_message {
            ui.add_space(8.0);
            ui.colored_label(egui::Color32::from_rgb(234, 67, 53), message);
        }

        ui.add_space(12.0);
        ui.horizontal(|ui| {
            if ui.button("Save Goals").clicked() {
                match self.build_goals() {
                    Ok(goals) => action = Some(GoalSettingsAction::Save(goals)),
                    Err(message) => self.error_message = Some(message),
                }
            }
            if ui.button("Cancel").clicked() {
                action = Some(GoalSettingsAction::Cancel);
            }
        });

        action
    }

    /// Validate the input buffers into a goals record.
    fn build_goals(&self) -> Result<TrainingGoals, String> {
        let marathon_date = {
            let trimmed = self.marathon_date_input.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(
                    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                        .map_err(|_| "Marathon date must be YYYY-MM-DD".to_string())?,
                )
            }
        };

        let notes = {
            let trimmed = self.notes_input.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        };

        Ok(TrainingGoals {
            goal_time: self.goals.goal_time.trim().to_string(),
            comfortable_pace: self.goals.comfortable_pace.trim().to_string(),
            fastest_pace: self.goals.fastest_pace.trim().to_string(),
            fitness_level: self.goals.fitness_level,
            marathon_date,
            long_term_notes: notes,
        })
    }
}

impl Default for GoalSettingsScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_goals_fills_buffers() {
        let mut screen = GoalSettingsScreen::new();
        let mut goals = TrainingGoals::default();
        goals.marathon_date = NaiveDate::from_ymd_opt(2025, 4, 21);
        goals.long_term_notes = Some("Stay healthy".to_string());

        screen.set_goals(&goals);

        assert_eq!(screen.marathon_date_input, "2025-04-21");
        assert_eq!(screen.notes_input, "Stay healthy");
    }

    #[test]
    fn test_build_goals_rejects_bad_date() {
        let mut screen = GoalSettingsScreen::new();
        screen.set_goals(&TrainingGoals::default());
        screen.marathon_date_input = "next spring".to_string();

        assert!(screen.build_goals().is_err());
    }

    #[test]
    fn test_build_goals_empty_optionals_become_none() {
        let mut screen = GoalSettingsScreen::new();
        screen.set_goals(&TrainingGoals::default());
        screen.marathon_date_input = "  ".to_string();
        screen.notes_input = String::new();

        let built = screen.build_goals().unwrap();
        assert!(built.marathon_date.is_none());
        assert!(built.long_term_notes.is_none());
    }
}
