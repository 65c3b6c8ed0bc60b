//! Main application state and egui integration.
//!
//! T060: Create App struct with egui state
//! T061: Implement screen navigation and modal wiring
//! T062: Wire the suggestion request through tokio and a crossbeam channel

use anyhow::Context as _;
use chrono::{Local, NaiveDate};
use crossbeam::channel::{bounded, Receiver, TryRecvError};
use eframe::egui;

use runplan::export::ics::{export_ics, generate_ics_filename};
use runplan::storage::config::{get_data_dir, load_config, AppConfig};
use runplan::storage::store::PlanStore;
use runplan::suggest::client::SuggestionClient;
use runplan::suggest::prompt::{build_prompt, WeekPreferences};
use runplan::suggest::reviewer::SuggestionReviewer;
use runplan::suggest::types::{SuggestError, SuggestedActivity};
use runplan::ui::screens::{
    GoalSettingsAction, GoalSettingsScreen, PlannerAction, PlannerScreen, Screen,
};
use runplan::ui::theme::Theme;
use runplan::ui::widgets::{
    ActivityFormAction, ActivityFormWidget, SuggestionAction, SuggestionModalWidget,
};

/// Outcome of one suggestion request, delivered from the async task.
type SuggestionResult = Result<Vec<SuggestedActivity>, SuggestError>;

/// Main application state.
pub struct PlannerApp {
    /// Persisted store for activities and goals
    store: PlanStore,
    /// Application configuration
    config: AppConfig,
    /// UI theme
    theme: Theme,
    /// Current screen
    current_screen: Screen,
    /// Planner screen state
    planner_screen: PlannerScreen,
    /// Goal settings screen state
    goal_settings_screen: GoalSettingsScreen,
    /// Activity form modal
    activity_form: ActivityFormWidget,
    /// Suggestion modal
    suggestion_modal: SuggestionModalWidget,
    /// Suggestion review state machine
    reviewer: SuggestionReviewer,
    /// Async runtime for the suggestion request
    runtime: tokio::runtime::Runtime,
    /// Channel delivering the in-flight suggestion result
    suggestion_rx: Option<Receiver<SuggestionResult>>,
    /// Transient status notice shown in the footer
    status_message: Option<String>,
}

impl PlannerApp {
    /// Create a new application instance.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Load configuration
        let mut config = load_config().unwrap_or_default();
        if config.data_dir.as_os_str().is_empty() {
            config.data_dir = get_data_dir();
        }

        // Open the local store
        let store = PlanStore::open(&config.data_dir);

        // Set up theme
        let theme = if config.ui.dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        };
        cc.egui_ctx.set_visuals(theme.visuals());

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .expect("Failed to create async runtime");

        let today = Local::now().date_naive();

        Self {
            store,
            config,
            theme,
            current_screen: Screen::Planner,
            planner_screen: PlannerScreen::new(today),
            goal_settings_screen: GoalSettingsScreen::new(),
            activity_form: ActivityFormWidget::new(),
            suggestion_modal: SuggestionModalWidget::new(today),
            reviewer: SuggestionReviewer::new(),
            runtime,
            suggestion_rx: None,
            status_message: None,
        }
    }

    /// Poll the channel for a completed suggestion request.
    fn poll_suggestions(&mut self) {
        let Some(rx) = &self.suggestion_rx else {
            return;
        };

        match rx.try_recv() {
            Ok(result) => {
                if let Err(ref e) = result {
                    tracing::warn!("Suggestion request failed: {}", e);
                }
                self.reviewer.complete(result);
                self.suggestion_rx = None;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                tracing::error!("Suggestion task ended without a result");
                self.reviewer.complete(Err(SuggestError::Api(
                    "suggestion request ended unexpectedly".to_string(),
                )));
                self.suggestion_rx = None;
            }
        }
    }

    /// Kick off a suggestion request for the given preferences.
    fn request_suggestions(&mut self, preferences: WeekPreferences) {
        self.reviewer.begin_request();

        // A missing credential never results in a network call
        let client = match SuggestionClient::from_settings(&self.config.suggestion) {
            Ok(client) => client,
            Err(e) => {
                self.reviewer.complete(Err(e));
                return;
            }
        };

        let prompt = build_prompt(self.store.goals(), &preferences);
        let fallback_date = Local::now().date_naive();

        let (tx, rx) = bounded(1);
        self.suggestion_rx = Some(rx);

        self.runtime.spawn(async move {
            let result = client.fetch_suggestions(&prompt, fallback_date).await;
            let _ = tx.send(result);
        });
    }

    /// Handle an action from the planner screen.
    fn handle_planner_action(&mut self, action: PlannerAction, today: NaiveDate) {
        match action {
            PlannerAction::AddActivity(date) => self.activity_form.open_new(date),
            PlannerAction::EditActivity(id) => {
                if let Some(activity) = self.store.activity(id).cloned() {
                    self.activity_form.open_edit(&activity);
                }
            }
            PlannerAction::DeleteActivity(id) => {
                if let Err(e) = self.store.delete_activity(id) {
                    tracing::error!("Failed to delete activity: {}", e);
                    self.status_message = Some(format!("Delete failed: {}", e));
                }
            }
            PlannerAction::OpenSuggestions => {
                // A fresh suggestion session unless a request is in flight
                if !self.reviewer.is_loading() {
                    self.reviewer.reset();
                }
                self.suggestion_modal.open(today);
            }
            PlannerAction::OpenGoalSettings => {
                self.goal_settings_screen.set_goals(self.store.goals());
                self.current_screen = Screen::GoalSettings;
            }
            PlannerAction::ExportCalendar => self.export_calendar(today),
        }
    }

    /// Export upcoming activities through a native save dialog.
    fn export_calendar(&mut self, today: NaiveDate) {
        match export_ics(self.store.activities(), today) {
            Ok(content) => {
                let picked = rfd::FileDialog::new()
                    .set_file_name(generate_ics_filename(today))
                    .add_filter("iCalendar", &["ics"])
                    .save_file();

                if let Some(path) = picked {
                    let written = std::fs::write(&path, content)
                        .with_context(|| format!("could not write {}", path.display()));
                    match written {
                        Ok(()) => {
                            self.status_message =
                                Some(format!("Exported calendar to {}", path.display()));
                        }
                        Err(e) => {
                            tracing::error!("Calendar export failed: {:#}", e);
                            self.status_message = Some(format!("Export failed: {:#}", e));
                        }
                    }
                }
            }
            Err(e) => {
                // Zero qualifying activities produces a notice, not a file
                self.status_message = Some(e.to_string());
            }
        }
    }

    /// Handle an action from the activity form.
    fn handle_form_action(&mut self, action: ActivityFormAction) {
        match action {
            ActivityFormAction::Save(activity) => {
                let result = if self.store.activity(activity.id).is_some() {
                    self.store.update_activity(activity)
                } else {
                    self.store.add_activity(activity)
                };
                if let Err(e) = result {
                    tracing::error!("Failed to save activity: {}", e);
                    self.status_message = Some(format!("Save failed: {}", e));
                }
            }
            ActivityFormAction::Delete(id) => {
                if let Err(e) = self.store.delete_activity(id) {
                    tracing::error!("Failed to delete activity: {}", e);
                    self.status_message = Some(format!("Delete failed: {}", e));
                }
            }
        }
    }

    /// Handle an action from the suggestion modal.
    fn handle_suggestion_action(&mut self, action: SuggestionAction) {
        match action {
            SuggestionAction::Submit(preferences) => self.request_suggestions(preferences),
            SuggestionAction::Accept(index) => {
                if let Some(activity) = self.reviewer.accept(index) {
                    if let Err(e) = self.store.add_activity(activity) {
                        tracing::error!("Failed to add suggested activity: {}", e);
                        self.status_message = Some(format!("Save failed: {}", e));
                    }
                }
            }
            SuggestionAction::AcceptAll => {
                for activity in self.reviewer.accept_all() {
                    if let Err(e) = self.store.add_activity(activity) {
                        tracing::error!("Failed to add suggested activity: {}", e);
                        self.status_message = Some(format!("Save failed: {}", e));
                    }
                }
            }
            SuggestionAction::EditPreferences => self.reviewer.edit_preferences(),
            SuggestionAction::Close => {
                self.suggestion_modal.close();
                // Added-candidate tracking does not survive a close; an
                // in-flight request keeps its state so the result can land.
                if !self.reviewer.is_loading() {
                    self.reviewer.reset();
                }
            }
        }
    }
}

impl eframe::App for PlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_suggestions();

        if self.reviewer.is_loading() {
            ctx.request_repaint_after(std::time::Duration::from_millis(200));
        }

        let today = Local::now().date_naive();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("RunPlan").size(22.0).strong());
                ui.label(
                    egui::RichText::new("Marathon Training Planner")
                        .size(14.0)
                        .weak(),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let label = match self.theme {
                        Theme::Dark => "Light Mode",
                        Theme::Light => "Dark Mode",
                    };
                    if ui.small_button(label).clicked() {
                        self.theme = match self.theme {
                            Theme::Dark => Theme::Light,
                            Theme::Light => Theme::Dark,
                        };
                        ctx.set_visuals(self.theme.visuals());
                    }
                });
            });
        });

        egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(
                        "Plan your victory. One step, one swim, one day at a time.",
                    )
                    .weak()
                    .small(),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let dismiss = match self.status_message {
                        Some(ref message) => {
                            let clicked = ui.small_button("x").clicked();
                            ui.label(egui::RichText::new(message).small());
                            clicked
                        }
                        None => false,
                    };
                    if dismiss {
                        self.status_message = None;
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.current_screen {
            Screen::Planner => {
                let action = self.planner_screen.show(
                    ui,
                    self.store.activities(),
                    today,
                    self.reviewer.is_loading(),
                );
                if let Some(action) = action {
                    self.handle_planner_action(action, today);
                }
            }
            Screen::GoalSettings => {
                if let Some(action) = self.goal_settings_screen.show(ui) {
                    match action {
                        GoalSettingsAction::Save(goals) => {
                            if let Err(e) = self.store.set_goals(goals) {
                                tracing::error!("Failed to save goals: {}", e);
                                self.status_message = Some(format!("Save failed: {}", e));
                            }
                            // Return to the planner after saving
                            self.current_screen = Screen::Planner;
                        }
                        GoalSettingsAction::Cancel => self.current_screen = Screen::Planner,
                    }
                }
            }
        });

        if let Some(action) = self.activity_form.show(ctx) {
            self.handle_form_action(action);
        }

        if let Some(action) = self.suggestion_modal.show(ctx, &mut self.reviewer) {
            self.handle_suggestion_action(action);
        }
    }
}
