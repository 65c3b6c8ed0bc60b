//! Planner screen implementation.
//!
//! T052: Implement calendar and schedule view modes
//! T053: Wire controls row for add/suggest/goals/export actions

use chrono::{Datelike, Duration, NaiveDate};
use egui::{Color32, RichText, Ui};
use uuid::Uuid;

use crate::activities::types::Activity;
use crate::ui::theme::activity_colors;

/// Planner view mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Month calendar grid
    #[default]
    Calendar,
    /// Chronological schedule list
    Schedule,
}

/// Action requested from the planner screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerAction {
    /// Open the activity form for a new activity on the given date
    AddActivity(NaiveDate),
    /// Open the activity form for an existing activity
    EditActivity(Uuid),
    /// Delete an activity after confirmation
    DeleteActivity(Uuid),
    /// Open the suggestion modal
    OpenSuggestions,
    /// Navigate to the goal settings screen
    OpenGoalSettings,
    /// Export upcoming activities as an iCalendar file
    ExportCalendar,
}

/// Planner screen state.
pub struct PlannerScreen {
    /// Current view mode
    pub view_mode: ViewMode,
    /// First day of the month shown in calendar view
    calendar_month: NaiveDate,
    /// Activity pending delete confirmation
    confirm_delete: Option<Uuid>,
}

impl PlannerScreen {
    /// Create a planner screen showing the month containing `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            view_mode: ViewMode::default(),
            calendar_month: first_of_month(today),
            confirm_delete: None,
        }
    }

    /// Render the planner. Returns an action when the user requests one.
    pub fn show(
        &mut self,
        ui: &mut Ui,
        activities: &[Activity],
        today: NaiveDate,
        is_suggesting: bool,
    ) -> Option<PlannerAction> {
        let mut action = self.render_controls(ui, today, is_suggesting);

        ui.add_space(12.0);

        let view_action = match self.view_mode {
            ViewMode::Calendar => self.render_calendar(ui, activities, today),
            ViewMode::Schedule => self.render_schedule(ui, activities),
        };
        action = action.or(view_action);

        if let Some(confirm_action) = self.render_delete_confirmation(ui, activities) {
            action = Some(confirm_action);
        }

        action
    }

    /// Render the controls row.
    fn render_controls(
        &mut self,
        ui: &mut Ui,
        today: NaiveDate,
        is_suggesting: bool,
    ) -> Option<PlannerAction> {
        let mut action = None;

        ui.horizontal_wrapped(|ui| {
            if ui
                .selectable_label(self.view_mode == ViewMode::Calendar, "Calendar View")
                .clicked()
            {
                self.view_mode = ViewMode::Calendar;
            }
            if ui
                .selectable_label(self.view_mode == ViewMode::Schedule, "Schedule View")
                .clicked()
            {
                self.view_mode = ViewMode::Schedule;
            }

            ui.separator();

            if ui.button("Set Goals").clicked() {
                action = Some(PlannerAction::OpenGoalSettings);
            }

            if ui.button("Export Calendar (.ics)").clicked() {
                action = Some(PlannerAction::ExportCalendar);
            }

            ui.separator();

            let suggest_label = if is_suggesting {
                "Suggesting..."
            } else {
                "Suggest Weekly Plan"
            };
            if ui
                .add_enabled(!is_suggesting, egui::Button::new(suggest_label))
                .clicked()
            {
                action = Some(PlannerAction::OpenSuggestions);
            }

            if ui.button("Add Activity").clicked() {
                action = Some(PlannerAction::AddActivity(today));
            }
        });

        action
    }

    /// Render the month calendar grid.
    fn render_calendar(
        &mut self,
        ui: &mut Ui,
        activities: &[Activity],
        today: NaiveDate,
    ) -> Option<PlannerAction> {
        let mut action = None;

        ui.horizontal(|ui| {
            if ui.button("<").clicked() {
                self.calendar_month = previous_month(self.calendar_month);
            }
            ui.label(
                RichText::new(self.calendar_month.format("%B %Y").to_string())
                    .size(18.0)
                    .strong(),
            );
            if ui.button(">").clicked() {
                self.calendar_month = next_month(self.calendar_month);
            }
            if ui.button("Today").clicked() {
                self.calendar_month = first_of_month(today);
            }
        });

        ui.add_space(8.0);

        let cell_width = (ui.available_width() - 6.0 * ui.spacing().item_spacing.x) / 7.0;

        egui::Grid::new("calendar_grid")
            .num_columns(7)
            .min_col_width(cell_width)
            .max_col_width(cell_width)
            .show(ui, |ui| {
                for name in ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"] {
                    ui.label(RichText::new(name).strong());
                }
                ui.end_row();

                let offset = self.calendar_month.weekday().num_days_from_monday() as i64;
                let mut cell_date = self.calendar_month - Duration::days(offset);
                let month_end = next_month(self.calendar_month) - Duration::days(1);

                // Six rows cover every month layout
                for _week in 0..6 {
                    for _day in 0..7 {
                        if let Some(cell_action) =
                            self.render_day_cell(ui, cell_date, activities, today)
                        {
                            action = Some(cell_action);
                        }
                        cell_date += Duration::days(1);
                    }
                    ui.end_row();

                    if cell_date > month_end {
                        break;
                    }
                }
            });

        action
    }

    /// Render one calendar day cell.
    fn render_day_cell(
        &mut self,
        ui: &mut Ui,
        date: NaiveDate,
        activities: &[Activity],
        today: NaiveDate,
    ) -> Option<PlannerAction> {
        let mut action = None;
        let in_month = date.month() == self.calendar_month.month();

        let fill = if date == today {
            ui.visuals().selection.bg_fill
        } else if in_month {
            ui.visuals().faint_bg_color
        } else {
            ui.visuals().extreme_bg_color
        };

        egui::Frame::new()
            .fill(fill)
            .inner_margin(4.0)
            .corner_radius(4.0)
            .show(ui, |ui| {
                ui.set_min_height(64.0);
                ui.vertical(|ui| {
                    let day_label = if in_month {
                        RichText::new(date.day().to_string()).strong()
                    } else {
                        RichText::new(date.day().to_string()).weak()
                    };
                    if ui.small_button(day_label).clicked() {
                        action = Some(PlannerAction::AddActivity(date));
                    }

                    for activity in activities.iter().filter(|a| a.date == date) {
                        let color = activity_colors::accent(activity.activity_type);
                        let label = format!(
                            "{} {}m",
                            activity.activity_type.label(),
                            activity.duration_minutes
                        );
                        if ui
                            .add(egui::Button::new(RichText::new(label).color(color).small()))
                            .clicked()
                        {
                            action = Some(PlannerAction::EditActivity(activity.id));
                        }
                    }
                });
            });

        action
    }

    /// Render the chronological schedule list.
    fn render_schedule(&mut self, ui: &mut Ui, activities: &[Activity]) -> Option<PlannerAction> {
        let mut action = None;

        if activities.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(32.0);
                ui.label(RichText::new("No Activities Planned Yet").size(18.0).strong());
                ui.label(
                    RichText::new("Click \"Add Activity\" to start planning your training.")
                        .weak(),
                );
            });
            return None;
        }

        let mut sorted: Vec<&Activity> = activities.iter().collect();
        sorted.sort_by_key(|a| a.date);

        egui::ScrollArea::vertical().show(ui, |ui| {
            for activity in sorted {
                let accent = activity_colors::accent(activity.activity_type);

                egui::Frame::new()
                    .fill(activity_colors::tint(activity.activity_type))
                    .inner_margin(8.0)
                    .corner_radius(6.0)
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.horizontal(|ui| {
                            ui.vertical(|ui| {
                                ui.horizontal(|ui| {
                                    ui.label(
                                        RichText::new(activity.activity_type.label())
                                            .color(accent)
                                            .strong(),
                                    );
                                    ui.label(
                                        RichText::new(
                                            activity.date.format("%a, %b %d, %Y").to_string(),
                                        )
                                        .strong(),
                                    );
                                });

                                let mut detail =
                                    format!("Duration: {} minutes", activity.duration_minutes);
                                if let Some(distance) = activity.distance_km {
                                    detail.push_str(&format!(" | Distance: {} km", distance));
                                }
                                ui.label(detail);

                                if let Some(ref notes) = activity.notes {
                                    ui.label(RichText::new(format!("Notes: {}", notes)).weak());
                                }
                            });

                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    if ui
                                        .button(RichText::new("Delete").color(Color32::from_rgb(
                                            234, 67, 53,
                                        )))
                                        .clicked()
                                    {
                                        self.confirm_delete = Some(activity.id);
                                    }
                                    if ui.button("Edit").clicked() {
                                        action = Some(PlannerAction::EditActivity(activity.id));
                                    }
                                },
                            );
                        });
                    });
                ui.add_space(6.0);
            }
        });

        action
    }

    /// Render the delete confirmation dialog, if one is pending.
    fn render_delete_confirmation(
        &mut self,
        ui: &mut Ui,
        activities: &[Activity],
    ) -> Option<PlannerAction> {
        let id = self.confirm_delete?;
        let Some(activity) = activities.iter().find(|a| a.id == id) else {
            self.confirm_delete = None;
            return None;
        };

        let mut action = None;

        egui::Window::new("Delete Activity?")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ui.ctx(), |ui| {
                ui.label(format!(
                    "Delete the {} on {}?",
                    activity.activity_type.label(),
                    activity.date.format("%b %d, %Y")
                ));
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        action = Some(PlannerAction::DeleteActivity(id));
                        self.confirm_delete = None;
                    }
                    if ui.button("Cancel").clicked() {
                        self.confirm_delete = None;
                    }
                });
            });

        action
    }
}

/// First day of the month containing `date`.
fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// First day of the previous month.
fn previous_month(month_start: NaiveDate) -> NaiveDate {
    let (year, month) = if month_start.month() == 1 {
        (month_start.year() - 1, 12)
    } else {
        (month_start.year(), month_start.month() - 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(month_start)
}

/// First day of the next month.
fn next_month(month_start: NaiveDate) -> NaiveDate {
    let (year, month) = if month_start.month() == 12 {
        (month_start.year() + 1, 1)
    } else {
        (month_start.year(), month_start.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(month_start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_of_month() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 17).unwrap();
        assert_eq!(first_of_month(date), NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
    }

    #[test]
    fn test_month_navigation_wraps_years() {
        let january = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(
            previous_month(january),
            NaiveDate::from_ymd_opt(2023, 12, 1).unwrap()
        );

        let december = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        assert_eq!(next_month(december), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }

    #[test]
    fn test_new_screen_shows_current_month() {
        let today = NaiveDate::from_ymd_opt(2024, 7, 17).unwrap();
        let screen = PlannerScreen::new(today);

        assert_eq!(screen.view_mode, ViewMode::Calendar);
        assert_eq!(screen.calendar_month, NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
    }
}
