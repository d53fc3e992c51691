use std::env;

use chrono::{Local, Utc};
use eframe::{egui, App, CreationContext, Frame};
use egui::{Align, Color32, Layout, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use tracing::warn;

use workout_log::api::{ApiClient, TemplateApi, WorkoutApi};
use workout_log::form::SetRow;
use workout_log::storage::FileStore;
use workout_log::{
    logging, Config, ExerciseLog, HistoryFilter, NewSession, SessionEditor, WorkoutError,
    WorkoutSession, WorkoutStore, WorkoutTemplate,
};

type Client = ApiClient<FileStore>;

fn main() -> Result<(), eframe::Error> {
    let config = Config::from_env().unwrap_or_else(|err| {
        eprintln!("{err}; falling back to defaults");
        Config::default()
    });
    logging::init(&config.log_filter);
    let workout_id = env::args().nth(1);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 900.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Workout Log",
        options,
        Box::new(move |cc| {
            let app = WorkoutApp::new(cc, &config, workout_id.as_deref())?;
            Ok(Box::new(app))
        }),
    )
}

enum EditorAction {
    AddExercise,
    RemoveExercise(usize),
    AddSet(usize),
    RemoveSet(usize, usize),
    TogglePanel(usize),
    Save,
    Finish,
    Delete,
    NewWorkout,
    ApplyTemplate(i64),
    Open(String),
    RefreshHistory,
    FilterHistory(HistoryFilter),
    SignIn(String),
    SignOut,
}

struct WorkoutApp {
    editor: SessionEditor<Client>,
    templates: Vec<WorkoutTemplate>,
    history: Vec<WorkoutSession>,
    history_filter: HistoryFilter,
    token_input: String,
    notice: Option<String>,
}

impl WorkoutApp {
    fn new(
        cc: &CreationContext,
        config: &Config,
        workout_id: Option<&str>,
    ) -> Result<Self, WorkoutError> {
        let mut style = (*cc.egui_ctx.style()).clone();
        style.visuals = egui::Visuals::dark();
        style.text_styles.insert(
            egui::TextStyle::Body,
            egui::FontId::new(16.0, egui::FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Heading,
            egui::FontId::new(24.0, egui::FontFamily::Proportional),
        );
        cc.egui_ctx.set_style(style);

        let tokens = FileStore::open(config.token_path())?;
        let client = ApiClient::new(config, tokens)?;
        let mut editor = SessionEditor::new(WorkoutStore::new(client));

        match workout_id {
            Some(id) => editor.load(id),
            None => editor.initialize(NewSession::default()),
        }

        let mut app = WorkoutApp {
            editor,
            templates: Vec::new(),
            history: Vec::new(),
            history_filter: HistoryFilter::default(),
            token_input: String::new(),
            notice: None,
        };
        app.fetch_templates();
        app.refresh_history();
        Ok(app)
    }

    fn fetch_templates(&mut self) {
        match self.editor.store().api().list_templates() {
            Ok(templates) => self.templates = templates,
            Err(err) => {
                warn!(error = %err, "could not load templates");
                self.notice = Some("Error loading templates".to_string());
            }
        }
    }

    fn refresh_history(&mut self) {
        match self.history_filter.fetch(self.editor.store().api(), Utc::now()) {
            Ok(workouts) => self.history = workouts,
            Err(err) => warn!(error = %err, "could not load workout history"),
        }
    }

    fn sign_in(&mut self, token: &str) {
        match self.editor.api_mut().sign_in(token) {
            Ok(()) => {
                self.notice = None;
                self.fetch_templates();
                self.refresh_history();
            }
            Err(err) => {
                warn!(error = %err, "could not store token");
                self.notice = Some(err.to_string());
            }
        }
    }

    fn apply(&mut self, action: EditorAction) {
        match action {
            EditorAction::AddExercise => self.editor.add_exercise(ExerciseLog::blank()),
            EditorAction::RemoveExercise(index) => self.editor.remove_exercise(index),
            EditorAction::AddSet(index) => self.editor.add_set(index),
            EditorAction::RemoveSet(exercise, set) => self.editor.remove_set(exercise, set),
            EditorAction::TogglePanel(index) => self.editor.panels_mut().toggle(index),
            EditorAction::Save => match self.editor.save() {
                Ok(()) => {
                    self.notice = None;
                    self.refresh_history();
                }
                Err(err) => self.notice = Some(err.to_string()),
            },
            EditorAction::Finish => match self.editor.finish() {
                Ok(()) => {
                    self.notice = None;
                    self.refresh_history();
                }
                Err(err) => self.notice = Some(err.to_string()),
            },
            EditorAction::Delete => {
                self.editor.delete();
                if self.editor.store().current_workout().is_none() {
                    self.editor.initialize(NewSession::default());
                }
                self.refresh_history();
            }
            EditorAction::NewWorkout => self.editor.initialize(NewSession::default()),
            EditorAction::ApplyTemplate(id) => {
                match self.editor.store().api().get_template(id) {
                    Ok(template) => self.editor.apply_template(&template),
                    Err(err) => {
                        warn!(template_id = id, error = %err, "could not load template");
                        self.notice = Some("Error loading template details".to_string());
                    }
                }
            }
            EditorAction::Open(id) => self.editor.load(&id),
            EditorAction::RefreshHistory => self.refresh_history(),
            EditorAction::FilterHistory(filter) => {
                self.history_filter = filter;
                self.refresh_history();
            }
            EditorAction::SignIn(token) => self.sign_in(&token),
            EditorAction::SignOut => {
                if let Err(err) = self.editor.api_mut().sign_out() {
                    warn!(error = %err, "could not remove token");
                }
                self.templates.clear();
                self.history.clear();
            }
        }
    }
}

impl App for WorkoutApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let mut actions = Vec::new();

        egui::SidePanel::left("history")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| self.show_history(ui, &mut actions));

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| self.show_status(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                self.show_header(ui, &mut actions);
                ui.separator();
                self.show_exercises(ui, &mut actions);
                ui.add_space(10.0);
                self.show_controls(ui, &mut actions);
            });
        });

        for action in actions {
            self.apply(action);
        }
    }
}

impl WorkoutApp {
    fn show_account(&mut self, ui: &mut Ui, actions: &mut Vec<EditorAction>) {
        if self.editor.store().api().is_signed_in() {
            ui.horizontal(|ui| {
                ui.label("Signed in");
                if ui.small_button("Sign out").clicked() {
                    actions.push(EditorAction::SignOut);
                }
            });
        } else {
            ui.label("Access token");
            ui.add(egui::TextEdit::singleline(&mut self.token_input).password(true));
            let token = self.token_input.trim();
            if ui
                .add_enabled(!token.is_empty(), egui::Button::new("Sign in"))
                .clicked()
            {
                actions.push(EditorAction::SignIn(token.to_string()));
                self.token_input.clear();
            }
        }
        ui.separator();
    }

    fn show_history(&mut self, ui: &mut Ui, actions: &mut Vec<EditorAction>) {
        self.show_account(ui, actions);

        ui.horizontal(|ui| {
            ui.heading("Workouts");
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.small_button("⟳").clicked() {
                    actions.push(EditorAction::RefreshHistory);
                }
            });
        });

        let mut filters = vec![
            (HistoryFilter::All, HistoryFilter::All.to_string()),
            (HistoryFilter::LastDays(7), HistoryFilter::LastDays(7).to_string()),
            (HistoryFilter::LastDays(30), HistoryFilter::LastDays(30).to_string()),
        ];
        filters.extend(self.templates.iter().filter_map(|template| {
            template
                .id
                .map(|id| (HistoryFilter::Template(id), template.name.clone()))
        }));
        let selected_text = filters
            .iter()
            .find(|(filter, _)| *filter == self.history_filter)
            .map_or_else(|| self.history_filter.to_string(), |(_, label)| label.clone());
        egui::ComboBox::from_id_salt("history_filter")
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                for (filter, label) in filters {
                    if ui
                        .selectable_label(filter == self.history_filter, label)
                        .clicked()
                    {
                        actions.push(EditorAction::FilterHistory(filter));
                    }
                }
            });
        ui.separator();

        ScrollArea::vertical().show(ui, |ui| {
            for workout in &self.history {
                let Some(id) = workout.id.as_deref() else {
                    continue;
                };
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(RichText::new(&workout.name).strong());
                        ui.label(
                            workout
                                .start_time
                                .with_timezone(&Local)
                                .format("%d %b %Y %H:%M")
                                .to_string(),
                        );
                    });
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.button("Open").clicked() {
                            actions.push(EditorAction::Open(id.to_string()));
                        }
                    });
                });
                ui.add_space(6.0);
            }
        });
    }

    fn show_status(&self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            if self.editor.store().loading() {
                ui.spinner();
            }
            if let Some(error) = self.editor.store().error() {
                ui.label(RichText::new(error).color(Color32::RED));
            }
            if let Some(notice) = &self.notice {
                ui.label(RichText::new(notice).color(Color32::YELLOW));
            }
        });
    }

    fn show_header(&self, ui: &mut Ui, actions: &mut Vec<EditorAction>) {
        let mut form = self.editor.form_mut();

        ui.horizontal(|ui| {
            ui.label("Name");
            ui.text_edit_singleline(&mut form.name);
        });

        if let Some(start) = form.start_time {
            ui.label(format!(
                "Started {}",
                start.with_timezone(&Local).format("%d %b %Y %H:%M")
            ));
        }
        if let Some(end) = form.end_time {
            ui.label(
                RichText::new(format!(
                    "Finished {}",
                    end.with_timezone(&Local).format("%d %b %Y %H:%M")
                ))
                .color(Color32::GREEN),
            );
        }

        let selected = form.template_id;
        let selected_text = self
            .templates
            .iter()
            .find(|t| t.id.is_some() && t.id == selected)
            .map_or("None", |t| t.name.as_str());
        egui::ComboBox::from_label("Template")
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                for template in &self.templates {
                    let Some(id) = template.id else {
                        continue;
                    };
                    if ui
                        .selectable_label(selected == Some(id), template.name.as_str())
                        .clicked()
                    {
                        actions.push(EditorAction::ApplyTemplate(id));
                    }
                }
            });

        ui.label("Notes");
        ui.text_edit_multiline(&mut form.notes);
    }

    fn show_exercises(&self, ui: &mut Ui, actions: &mut Vec<EditorAction>) {
        let panels = self.editor.panels();
        let mut form = self.editor.form_mut();

        if form.exercises.is_empty() {
            ui.label("No exercises yet.");
            return;
        }

        for (index, row) in form.exercises.iter_mut().enumerate() {
            let title = format!("{} · {}", row.name, row.summary());
            let response = egui::CollapsingHeader::new(RichText::new(title).strong())
                .id_salt(("exercise", index))
                .open(Some(panels.is_expanded(index)))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label("Name");
                        ui.text_edit_singleline(&mut row.name);
                        ui.label("Muscle group");
                        ui.text_edit_singleline(&mut row.muscle_group);
                    });
                    ui.push_id(("sets", index), |ui| {
                        show_sets(ui, index, &mut row.sets, actions);
                    });
                    ui.horizontal(|ui| {
                        if ui.button("Add set").clicked() {
                            actions.push(EditorAction::AddSet(index));
                        }
                        if ui.button("Remove exercise").clicked() {
                            actions.push(EditorAction::RemoveExercise(index));
                        }
                    });
                });
            if response.header_response.clicked() {
                actions.push(EditorAction::TogglePanel(index));
            }
        }
    }

    fn show_controls(&self, ui: &mut Ui, actions: &mut Vec<EditorAction>) {
        let workout = self.editor.store().current_workout();
        let persisted = workout.as_ref().is_some_and(|w| w.id.is_some());
        let finished = workout.as_ref().is_some_and(|w| w.is_finished());

        ui.horizontal(|ui| {
            if ui.button("Add exercise").clicked() {
                actions.push(EditorAction::AddExercise);
            }
            if ui.button("Save").clicked() {
                actions.push(EditorAction::Save);
            }
            if !finished && ui.button("Finish workout").clicked() {
                actions.push(EditorAction::Finish);
            }
            if persisted && ui.button("Delete").clicked() {
                actions.push(EditorAction::Delete);
            }
            if ui.button("New workout").clicked() {
                actions.push(EditorAction::NewWorkout);
            }
        });
    }
}

fn show_sets(
    ui: &mut Ui,
    exercise_index: usize,
    sets: &mut [SetRow],
    actions: &mut Vec<EditorAction>,
) {
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto())
        .column(Column::auto().at_least(80.0))
        .column(Column::auto().at_least(60.0))
        .column(Column::auto().at_least(50.0))
        .column(Column::auto())
        .column(Column::auto())
        .header(20.0, |mut header| {
            for title in ["Set", "Weight", "Reps", "RPE", "Done", ""] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for (set_index, set) in sets.iter_mut().enumerate() {
                body.row(24.0, |mut row| {
                    row.col(|ui| {
                        ui.label(set.set_number.to_string());
                    });
                    row.col(|ui| {
                        ui.add(
                            egui::DragValue::new(&mut set.weight)
                                .speed(0.5)
                                .range(0.0..=1000.0),
                        );
                    });
                    row.col(|ui| {
                        ui.add(egui::DragValue::new(&mut set.reps).range(0..=1000));
                    });
                    row.col(|ui| {
                        // 0 stands for "not rated"
                        let mut rpe = set.rpe.unwrap_or(0);
                        if ui
                            .add(egui::DragValue::new(&mut rpe).range(0..=10))
                            .changed()
                        {
                            set.rpe = (rpe > 0).then_some(rpe);
                        }
                    });
                    row.col(|ui| {
                        ui.checkbox(&mut set.completed, "");
                    });
                    row.col(|ui| {
                        if ui.small_button("✕").clicked() {
                            actions.push(EditorAction::RemoveSet(exercise_index, set_index));
                        }
                    });
                });
            }
        });
}
