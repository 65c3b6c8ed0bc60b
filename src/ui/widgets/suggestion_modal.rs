//! Suggestion modal: preferences form and candidate review.
//!
//! T057: Implement the preferences form with the weekly shift schedule
//! T058: Implement candidate review with add/add-all and inline editing

use chrono::NaiveDate;
use egui::{Context, RichText};

use crate::suggest::prompt::{ShiftType, WeekPreferences};
use crate::suggest::reviewer::{ReviewerPhase, SuggestionReviewer};
use crate::ui::theme::activity_colors;

/// Action requested from the suggestion modal.
#[derive(Debug, Clone, PartialEq)]
pub enum SuggestionAction {
    /// Submit preferences and request a plan
    Submit(WeekPreferences),
    /// Accept the candidate at the given index
    Accept(usize),
    /// Accept every not-yet-added candidate
    AcceptAll,
    /// Return to the preferences form
    EditPreferences,
    /// Close the modal
    Close,
}

/// Per-candidate inline edit state.
struct CandidateEdit {
    index: usize,
    duration_input: String,
    distance_input: String,
    notes_input: String,
}

/// Modal for requesting and reviewing a suggested weekly plan.
pub struct SuggestionModalWidget {
    open: bool,
    preferences: WeekPreferences,
    start_date_input: String,
    date_error: Option<String>,
    editing: Option<CandidateEdit>,
}

impl SuggestionModalWidget {
    /// Create a closed modal.
    pub fn new(today: NaiveDate) -> Self {
        let preferences = WeekPreferences::for_week_of(today);
        let start_date_input = preferences.plan_start_date.to_string();
        Self {
            open: false,
            preferences,
            start_date_input,
            date_error: None,
            editing: None,
        }
    }

    /// Whether the modal is showing.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open the modal with fresh default preferences.
    pub fn open(&mut self, today: NaiveDate) {
        self.preferences = WeekPreferences::for_week_of(today);
        self.start_date_input = self.preferences.plan_start_date.to_string();
        self.date_error = None;
        self.editing = None;
        self.open = true;
    }

    /// Close the modal.
    pub fn close(&mut self) {
        self.open = false;
        self.editing = None;
    }

    /// Render the modal. Returns an action when the user requests one.
    pub fn show(
        &mut self,
        ctx: &Context,
        reviewer: &mut SuggestionReviewer,
    ) -> Option<SuggestionAction> {
        if !self.open {
            return None;
        }

        let mut action = None;
        let title = match reviewer.phase() {
            ReviewerPhase::CollectingPreferences => "Customize Your Plan",
            ReviewerPhase::Reviewing => "Suggested Training Plan",
        };

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(480.0);

                match reviewer.phase() {
                    ReviewerPhase::CollectingPreferences => {
                        action = self.render_preferences_form(ui, reviewer.is_loading());
                    }
                    ReviewerPhase::Reviewing => {
                        action = self.render_review(ui, reviewer);
                    }
                }

                ui.add_space(10.0);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Close").clicked() {
                        action = Some(SuggestionAction::Close);
                    }
                });
            });

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            action = Some(SuggestionAction::Close);
        }

        action
    }

    /// Render the preferences form.
    fn render_preferences_form(
        &mut self,
        ui: &mut egui::Ui,
        is_loading: bool,
    ) -> Option<SuggestionAction> {
        let mut action = None;

        ui.horizontal(|ui| {
            ui.label("Plan start date");
            let response = ui.text_edit_singleline(&mut self.start_date_input);
            ui.label(RichText::new("YYYY-MM-DD").weak());

            if response.changed() {
                match NaiveDate::parse_from_str(self.start_date_input.trim(), "%Y-%m-%d") {
                    Ok(date) => {
                        self.date_error = None;
                        if date != self.preferences.plan_start_date {
                            self.preferences.set_start_date(date);
                        }
                    }
                    Err(_) => {
                        self.date_error = Some("Start date must be YYYY-MM-DD".to_string());
                    }
                }
            }
        });

        if let Some(ref message) = self.date_error {
            ui.colored_label(egui::Color32::from_rgb(234, 67, 53), message);
        }

        ui.add_space(8.0);
        ui.label(RichText::new("Work schedule for the week").strong());
        egui::Grid::new("work_schedule_grid")
            .num_columns(3)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                for (index, day) in self.preferences.work_schedule.iter_mut().enumerate() {
                    ui.label(day.day_name());
                    ui.label(RichText::new(day.date.to_string()).weak());
                    egui::ComboBox::from_id_salt(("shift", index))
                        .selected_text(day.shift.label())
                        .show_ui(ui, |ui| {
                            for shift in ShiftType::ALL {
                                ui.selectable_value(&mut day.shift, shift, shift.label());
                            }
                        });
                    ui.end_row();
                }
            });

        ui.add_space(8.0);
        ui.label("Preferences for this week");
        ui.add(
            egui::TextEdit::multiline(&mut self.preferences.general_notes)
                .desired_rows(2)
                .desired_width(f32::INFINITY)
                .hint_text("e.g., I want one long run on Saturday."),
        );

        ui.add_space(6.0);
        ui.label("How did last week go? (optional)");
        ui.add(
            egui::TextEdit::multiline(&mut self.preferences.last_week_feedback)
                .desired_rows(2)
                .desired_width(f32::INFINITY)
                .hint_text("e.g., Long run felt easy, struggled with speed work."),
        );

        ui.add_space(10.0);
        let submit_enabled = !is_loading && self.date_error.is_none();
        if ui
            .add_enabled(submit_enabled, egui::Button::new("Suggest Plan"))
            .clicked()
        {
            action = Some(SuggestionAction::Submit(self.preferences.clone()));
        }

        action
    }

    /// Render the review phase: loading, error, empty state, or candidates.
    fn render_review(
        &mut self,
        ui: &mut egui::Ui,
        reviewer: &mut SuggestionReviewer,
    ) -> Option<SuggestionAction> {
        if reviewer.is_loading() {
            ui.vertical_centered(|ui| {
                ui.add_space(24.0);
                ui.spinner();
                ui.add_space(8.0);
                ui.label("Generating your personalized plan...");
                ui.add_space(24.0);
            });
            return None;
        }

        if let Some(error) = reviewer.error() {
            let mut action = None;
            egui::Frame::new()
                .fill(egui::Color32::from_rgb(60, 24, 24))
                .inner_margin(8.0)
                .corner_radius(6.0)
                .show(ui, |ui| {
                    ui.label(RichText::new("Error Fetching Suggestions").strong());
                    ui.label(error);
                    if ui.button("Edit Preferences & Try Again").clicked() {
                        action = Some(SuggestionAction::EditPreferences);
                    }
                });
            return action;
        }

        if reviewer.candidates().is_empty() {
            let mut action = None;
            ui.vertical_centered(|ui| {
                ui.add_space(16.0);
                ui.label(
                    "No suggestions generated. This might be due to very restrictive \
                     preferences or an issue with the service.",
                );
                if ui.button("Adjust Preferences & Try Again").clicked() {
                    action = Some(SuggestionAction::EditPreferences);
                }
                ui.add_space(16.0);
            });
            return action;
        }

        let mut action = None;

        egui::ScrollArea::vertical().max_height(380.0).show(ui, |ui| {
            for index in 0..reviewer.candidates().len() {
                if let Some(card_action) = self.render_candidate_card(ui, reviewer, index) {
                    action = Some(card_action);
                }
                ui.add_space(6.0);
            }
        });

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            let remaining = (0..reviewer.candidates().len()).any(|i| !reviewer.is_added(i));
            if ui
                .add_enabled(remaining, egui::Button::new("Add All to Plan"))
                .clicked()
            {
                action = Some(SuggestionAction::AcceptAll);
            }
            if ui.button("< Edit Preferences").clicked() {
                action = Some(SuggestionAction::EditPreferences);
            }
        });

        action
    }

    /// Render one candidate card.
    fn render_candidate_card(
        &mut self,
        ui: &mut egui::Ui,
        reviewer: &mut SuggestionReviewer,
        index: usize,
    ) -> Option<SuggestionAction> {
        let mut action = None;
        let is_added = reviewer.is_added(index);
        let candidate = reviewer.candidates()[index].clone();
        let accent = activity_colors::accent(candidate.activity_type);

        egui::Frame::new()
            .fill(activity_colors::tint(candidate.activity_type))
            .inner_margin(8.0)
            .corner_radius(6.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.horizontal(|ui| {
                            ui.label(
                                RichText::new(candidate.activity_type.label())
                                    .color(accent)
                                    .strong(),
                            );
                            ui.label(
                                RichText::new(
                                    candidate.date.format("%a, %b %d").to_string(),
                                )
                                .strong(),
                            );
                            ui.label(
                                RichText::new(format!("{} min", candidate.duration_minutes))
                                    .weak(),
                            );
                        });

                        if let Some(distance) = candidate.distance_km {
                            ui.label(format!("Distance: {} km", distance));
                        }
                        if let Some(ref notes) = candidate.notes {
                            ui.label(RichText::new(format!("Notes: {}", notes)).weak());
                        }
                    });

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let add_label = if is_added { "Added" } else { "Add to Plan" };
                        if ui
                            .add_enabled(!is_added, egui::Button::new(add_label))
                            .clicked()
                        {
                            action = Some(SuggestionAction::Accept(index));
                        }

                        let is_editing =
                            self.editing.as_ref().is_some_and(|e| e.index == index);
                        if !is_added
                            && !is_editing
                            && ui.small_button("Edit").clicked()
                        {
                            self.editing = Some(CandidateEdit {
                                index,
                                duration_input: candidate.duration_minutes.to_string(),
                                distance_input: candidate
                                    .distance_km
                                    .map(|d| d.to_string())
                                    .unwrap_or_default(),
                                notes_input: candidate
                                    .notes
                                    .clone()
                                    .unwrap_or_default(),
                            });
                        }
                    });
                });

                if self.editing.as_ref().is_some_and(|e| e.index == index) {
                    ui.separator();
                    self.render_candidate_edit(ui, reviewer);
                }
            });

        action
    }

    /// Render the inline editor for the candidate being edited.
    fn render_candidate_edit(&mut self, ui: &mut egui::Ui, reviewer: &mut SuggestionReviewer) {
        let Some(ref mut edit) = self.editing else {
            return;
        };

        egui::Grid::new(("candidate_edit", edit.index))
            .num_columns(2)
            .spacing([8.0, 4.0])
            .show(ui, |ui| {
                ui.label("Duration (minutes)");
                ui.text_edit_singleline(&mut edit.duration_input);
                ui.end_row();

                ui.label("Distance (km)");
                ui.text_edit_singleline(&mut edit.distance_input);
                ui.end_row();
            });
        ui.label("Notes");
        ui.add(
            egui::TextEdit::multiline(&mut edit.notes_input)
                .desired_rows(2)
                .desired_width(f32::INFINITY),
        );

        let mut done = false;
        ui.horizontal(|ui| {
            if ui.small_button("Apply").clicked() {
                let index = edit.index;
                let duration = edit
                    .duration_input
                    .trim()
                    .parse::<i64>()
                    .unwrap_or(0)
                    .max(0) as u32;
                let distance = edit.distance_input.trim().parse::<f64>().ok();
                let notes = {
                    let trimmed = edit.notes_input.trim();
                    if trimmed.is_empty() {
                        None
                    } else {
                        Some(trimmed.to_string())
                    }
                };

                if let Some(candidate) = reviewer.candidate_mut(index) {
                    candidate.duration_minutes = duration;
                    if candidate.activity_type.supports_distance() {
                        candidate.distance_km = distance;
                    }
                    candidate.notes = notes;
                }
                done = true;
            }
            if ui.small_button("Discard").clicked() {
                done = true;
            }
        });

        if done {
            self.editing = None;
        }
    }
}
