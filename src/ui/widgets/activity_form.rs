//! Activity form modal.
//!
//! T056: Implement the add/edit activity form with validation

use chrono::NaiveDate;
use egui::{Context, RichText};
use uuid::Uuid;

use crate::activities::editor::ActivityDraft;
use crate::activities::types::{Activity, ActivityType};

/// Action requested from the activity form.
#[derive(Debug, Clone, PartialEq)]
pub enum ActivityFormAction {
    /// Persist the activity (new or replacement)
    Save(Activity),
    /// Delete the activity being edited
    Delete(Uuid),
}

/// Modal form for creating or editing one activity.
pub struct ActivityFormWidget {
    open: bool,
    draft: ActivityDraft,
    /// Input buffers for validated fields
    date_input: String,
    duration_input: String,
    distance_input: String,
    error_message: Option<String>,
}

impl ActivityFormWidget {
    /// Create a closed form.
    pub fn new() -> Self {
        Self {
            open: false,
            draft: ActivityDraft::new(NaiveDate::default()),
            date_input: String::new(),
            duration_input: String::new(),
            distance_input: String::new(),
            error_message: None,
        }
    }

    /// Whether the form is showing.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open the form for a new activity on the given date.
    pub fn open_new(&mut self, date: NaiveDate) {
        self.draft = ActivityDraft::new(date);
        self.load_buffers();
        self.open = true;
    }

    /// Open the form pre-filled from an existing activity.
    pub fn open_edit(&mut self, activity: &Activity) {
        self.draft = ActivityDraft::edit(activity);
        self.load_buffers();
        self.open = true;
    }

    /// Close the form, discarding in-progress edits.
    pub fn close(&mut self) {
        self.open = false;
    }

    fn load_buffers(&mut self) {
        self.date_input = self.draft.date.to_string();
        self.duration_input = self.draft.duration_minutes.to_string();
        self.distance_input = self
            .draft
            .distance_km
            .map(|d| d.to_string())
            .unwrap_or_default();
        self.error_message = None;
    }

    /// Render the form. Returns an action on save or delete.
    pub fn show(&mut self, ctx: &Context) -> Option<ActivityFormAction> {
        if !self.open {
            return None;
        }

        let mut action = None;
        let title = if self.draft.is_new() {
            "Add Activity"
        } else {
            "Edit Activity"
        };

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(320.0);

                egui::Grid::new("activity_form_grid")
                    .num_columns(2)
                    .spacing([12.0, 10.0])
                    .show(ui, |ui| {
                        ui.label("Activity type");
                        egui::ComboBox::from_id_salt("activity_type")
                            .selected_text(self.draft.activity_type.label())
                            .show_ui(ui, |ui| {
                                for activity_type in ActivityType::ALL {
                                    if ui
                                        .selectable_label(
                                            self.draft.activity_type == activity_type,
                                            activity_type.label(),
                                        )
                                        .clicked()
                                    {
                                        self.draft.set_type(activity_type);
                                        if !activity_type.supports_distance() {
                                            self.distance_input.clear();
                                        }
                                    }
                                }
                            });
                        ui.end_row();

                        ui.label("Date");
                        ui.horizontal(|ui| {
                            ui.text_edit_singleline(&mut self.date_input);
                            ui.label(RichText::new("YYYY-MM-DD").weak());
                        });
                        ui.end_row();

                        ui.label("Duration (minutes)");
                        ui.text_edit_singleline(&mut self.duration_input);
                        ui.end_row();

                        if self.draft.activity_type.supports_distance() {
                            ui.label("Distance (km)");
                            ui.text_edit_singleline(&mut self.distance_input);
                            ui.end_row();
                        }
                    });

                ui.add_space(6.0);
                ui.label("Notes (optional)");
                ui.add(
                    egui::TextEdit::multiline(&mut self.draft.notes)
                        .desired_rows(3)
                        .desired_width(f32::INFINITY)
                        .hint_text("e.g., Morning run, felt good."),
                );

                if let Some(ref message) = self.error_message {
                    ui.add_space(6.0);
                    ui.colored_label(egui::Color32::from_rgb(234, 67, 53), message);
                }

                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    let save_label = if self.draft.is_new() {
                        "Add Activity"
                    } else {
                        "Save Changes"
                    };
                    if ui.button(save_label).clicked() {
                        match self.build_activity() {
                            Ok(activity) => {
                                action = Some(ActivityFormAction::Save(activity));
                                self.open = false;
                            }
                            Err(message) => self.error_message = Some(message),
                        }
                    }

                    if ui.button("Cancel").clicked() {
                        self.open = false;
                    }

                    if let Some(id) = self.draft.id {
                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                if ui
                                    .button(
                                        RichText::new("Delete")
                                            .color(egui::Color32::from_rgb(234, 67, 53)),
                                    )
                                    .clicked()
                                {
                                    action = Some(ActivityFormAction::Delete(id));
                                    self.open = false;
                                }
                            },
                        );
                    }
                });
            });

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.open = false;
        }

        action
    }

    /// Validate the input buffers into an activity record.
    fn build_activity(&mut self) -> Result<Activity, String> {
        let date = NaiveDate::parse_from_str(self.date_input.trim(), "%Y-%m-%d")
            .map_err(|_| "Date must be YYYY-MM-DD".to_string())?;

        let duration: i64 = self
            .duration_input
            .trim()
            .parse()
            .map_err(|_| "Duration must be a whole number of minutes".to_string())?;

        let distance = if self.draft.activity_type.supports_distance() {
            let trimmed = self.distance_input.trim();
            if trimmed.is_empty() {
                None
            } else {
                let km: f64 = trimmed
                    .parse()
                    .map_err(|_| "Distance must be a number of kilometers".to_string())?;
                if km < 0.0 {
                    return Err("Distance cannot be negative".to_string());
                }
                Some(km)
            }
        } else {
            None
        };

        self.draft.date = date;
        self.draft.duration_minutes = duration.max(0) as u32;
        self.draft.distance_km = distance;

        Ok(self.draft.build())
    }
}

impl Default for ActivityFormWidget {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()
    }

    #[test]
    fn test_open_new_loads_defaults() {
        let mut form = ActivityFormWidget::new();
        form.open_new(test_date());

        assert!(form.is_open());
        assert_eq!(form.date_input, "2024-07-15");
        assert_eq!(form.duration_input, "30");
        assert!(form.distance_input.is_empty());
    }

    #[test]
    fn test_build_rejects_bad_inputs() {
        let mut form = ActivityFormWidget::new();
        form.open_new(test_date());

        form.date_input = "yesterday".to_string();
        assert!(form.build_activity().is_err());

        form.date_input = "2024-07-15".to_string();
        form.duration_input = "half an hour".to_string();
        assert!(form.build_activity().is_err());

        form.duration_input = "30".to_string();
        form.distance_input = "-2".to_string();
        assert!(form.build_activity().is_err());
    }

    #[test]
    fn test_build_negative_duration_clamps_to_zero() {
        let mut form = ActivityFormWidget::new();
        form.open_new(test_date());
        form.duration_input = "-5".to_string();

        let activity = form.build_activity().unwrap();
        assert_eq!(activity.duration_minutes, 0);
    }

    #[test]
    fn test_edit_keeps_identity() {
        let original = Activity::new(ActivityType::Run, test_date(), 30, Some(5.0), None);

        let mut form = ActivityFormWidget::new();
        form.open_edit(&original);
        form.duration_input = "60".to_string();

        let rebuilt = form.build_activity().unwrap();
        assert_eq!(rebuilt.id, original.id);
        assert_eq!(rebuilt.duration_minutes, 60);
        assert_eq!(rebuilt.distance_km, Some(5.0));
    }
}
