mod common;

use common::{an_hour_ago, bench_press, saved_session, Call, FakeApi};
use workout_log::models::{ExerciseLog, TemplateExercise};
use workout_log::numbering::is_sequential;
use workout_log::{FormError, NewSession, SessionEditor, WorkoutStore, WorkoutTemplate};

fn editor_with(api: FakeApi) -> SessionEditor<FakeApi> {
    let mut editor = SessionEditor::new(WorkoutStore::new(api));
    editor.initialize(NewSession {
        name: Some("Push Day".to_string()),
        start_time: Some(an_hour_ago()),
        exercises: Some(vec![bench_press()]),
        ..Default::default()
    });
    editor
}

#[test]
fn form_follows_store() {
    let editor = editor_with(FakeApi::default());

    let form = editor.form();
    assert_eq!(form.name, "Push Day");
    assert_eq!(form.exercises.len(), 1);
    assert_eq!(form.exercises[0].name, "Bench Press");
}

#[test]
fn typed_values_survive_add_exercise() {
    let mut editor = editor_with(FakeApi::default());
    {
        let mut form = editor.form_mut();
        form.exercises[0].name = "Incline Bench".to_string();
        form.exercises[0].sets[0].weight = 62.5;
        form.exercises[0].sets[0].rpe = Some(7);
        form.exercises[0].sets[0].completed = true;
    }

    editor.add_exercise(ExerciseLog::blank());

    let form = editor.form();
    assert_eq!(form.exercises.len(), 2);
    assert_eq!(form.exercises[0].name, "Incline Bench");
    assert_eq!(form.exercises[0].sets[0].weight, 62.5);
    assert_eq!(form.exercises[0].sets[0].rpe, Some(7));
    assert!(form.exercises[0].sets[0].completed);
    assert_eq!(form.exercises[1].name, "New Exercise");
    // the store itself still holds the old values until save
    assert_eq!(editor.store().exercises()[0].name, "Bench Press");
}

#[test]
fn new_exercise_panel_expands_without_touching_others() {
    let mut editor = editor_with(FakeApi::default());
    editor.panels_mut().set_expanded(0, false);

    editor.add_exercise(ExerciseLog::blank());
    editor.add_exercise(ExerciseLog::blank());

    assert!(!editor.panels().is_expanded(0));
    assert!(editor.panels().is_expanded(1));
    assert!(editor.panels().is_expanded(2));
}

#[test]
fn add_set_copies_last_row_and_keeps_edits() {
    let mut editor = editor_with(FakeApi::default());
    {
        let mut form = editor.form_mut();
        form.exercises[0].muscle_group = "upper chest".to_string();
        form.exercises[0].sets[0].weight = 70.0;
        form.exercises[0].sets[0].reps = 6;
        form.exercises[0].sets[0].completed = true;
    }

    editor.add_set(0);

    let form = editor.form();
    let sets = &form.exercises[0].sets;
    assert_eq!(form.exercises[0].muscle_group, "upper chest");
    assert_eq!(sets.len(), 2);
    assert!(sets[0].completed);
    assert_eq!(sets[1].weight, 70.0);
    assert_eq!(sets[1].reps, 6);
    assert!(!sets[1].completed);
    assert!(is_sequential(sets));
}

#[test]
fn remove_set_shifts_captured_values() {
    let mut editor = editor_with(FakeApi::default());
    editor.add_set(0);
    editor.add_set(0);
    {
        let mut form = editor.form_mut();
        form.exercises[0].sets[0].weight = 50.0;
        form.exercises[0].sets[1].weight = 55.0;
        form.exercises[0].sets[2].weight = 57.5;
    }

    editor.remove_set(0, 1);

    let form = editor.form();
    let weights: Vec<f32> = form.exercises[0].sets.iter().map(|s| s.weight).collect();
    let numbers: Vec<u32> = form.exercises[0].sets.iter().map(|s| s.set_number).collect();
    assert_eq!(weights, vec![50.0, 57.5]);
    assert_eq!(numbers, vec![1, 2]);
    assert!(is_sequential(&editor.store().exercises()[0].sets));
}

#[test]
fn add_then_remove_set_scenario() {
    let mut editor = SessionEditor::new(WorkoutStore::new(FakeApi::default()));
    editor.initialize(NewSession::default());
    editor.add_exercise(bench_press());
    editor.add_set(0);
    editor.remove_set(0, 0);

    let exercises = editor.store().exercises();
    assert_eq!(exercises.len(), 1);
    assert_eq!(exercises[0].sets.len(), 1);
    assert_eq!(exercises[0].sets[0].set_number, 1);
    assert_eq!(editor.form().exercises[0].sets[0].set_number, 1);
}

#[test]
fn remove_exercise_keeps_other_rows_and_panels() {
    let mut editor = editor_with(FakeApi::default());
    editor.add_exercise(ExerciseLog::blank());
    editor.add_exercise(ExerciseLog::blank());
    editor.panels_mut().set_expanded(1, false);
    editor.form_mut().exercises[2].name = "Dips".to_string();

    editor.remove_exercise(1);

    let form = editor.form();
    assert_eq!(form.exercises.len(), 2);
    assert_eq!(form.exercises[1].name, "Dips");
    assert!(editor.panels().is_expanded(1));
    assert!(!editor.panels().is_expanded(2));
}

#[test]
fn structural_edits_without_session_do_nothing() {
    let mut editor = SessionEditor::new(WorkoutStore::new(FakeApi::default()));

    editor.add_exercise(bench_press());
    editor.add_set(0);
    editor.remove_set(0, 0);

    assert_eq!(editor.generation(), 0);
    assert!(editor.form().exercises.is_empty());
    assert!(editor.panels().expanded_indices().is_empty());
}

#[test]
fn save_folds_form_into_store() {
    let api = FakeApi::default();
    let mut editor = editor_with(api.clone());
    {
        let mut form = editor.form_mut();
        form.notes = "shoulder felt fine".to_string();
        form.exercises[0].sets[0].reps = 10;
        form.exercises[0].sets[0].completed = true;
    }

    editor.save().unwrap();

    assert_eq!(api.calls(), vec![Call::Create]);
    let stored = api.stored("w-1").unwrap();
    assert_eq!(stored.notes.as_deref(), Some("shoulder felt fine"));
    assert_eq!(stored.exercises[0].sets[0].reps, 10);
    assert!(stored.exercises[0].sets[0].completed);
    assert_eq!(editor.store().current_workout().unwrap().id.as_deref(), Some("w-1"));
}

#[test]
fn invalid_form_is_not_saved() {
    let api = FakeApi::default();
    let mut editor = editor_with(api.clone());
    editor.form_mut().exercises[0].name.clear();

    let result = editor.save();

    assert_eq!(result, Err(FormError::MissingExerciseName { index: 0 }));
    assert!(api.calls().is_empty());
}

#[test]
fn finish_saves_with_end_time() {
    let api = FakeApi::with_session(saved_session("abc"));
    let mut editor = SessionEditor::new(WorkoutStore::new(api.clone()));
    editor.load("abc");

    editor.finish().unwrap();

    assert_eq!(api.calls(), vec![Call::Get("abc".to_string()), Call::Update("abc".to_string())]);
    let stored = api.stored("abc").unwrap();
    assert!(stored.end_time.unwrap() > stored.start_time);
    assert!(editor.form().end_time.is_some());
}

#[test]
fn template_seeds_numbered_sets() {
    let mut editor = SessionEditor::new(WorkoutStore::new(FakeApi::default()));
    let template = WorkoutTemplate {
        id: Some(7),
        user_id: None,
        name: "Lower B".to_string(),
        description: Some("deadlift focus".to_string()),
        exercises: vec![TemplateExercise {
            id: None,
            template_id: Some(7),
            exercise_id: "deadlift".to_string(),
            exercise_name: "Deadlift".to_string(),
            sets: 4,
            reps: 3,
            weight: 140.0,
        }],
    };

    editor.apply_template(&template);

    let form = editor.form();
    assert_eq!(form.name, "Lower B");
    assert_eq!(form.template_id, Some(7));
    assert_eq!(form.exercises[0].sets.len(), 4);
    assert!(is_sequential(&form.exercises[0].sets));
}

#[test]
fn failed_load_keeps_form() {
    let api = FakeApi::default();
    let mut editor = editor_with(api.clone());
    editor.panels_mut().set_expanded(0, true);
    api.fail_with(404, "Workout not found");

    editor.load("missing");

    assert_eq!(editor.store().error(), Some("Workout not found"));
    assert_eq!(editor.form().exercises.len(), 1);
    assert!(editor.panels().is_expanded(0));
}

#[test]
fn typed_header_survives_structural_edits() {
    let mut editor = editor_with(FakeApi::default());
    {
        let mut form = editor.form_mut();
        form.name = "Heavy Push".to_string();
        form.notes = "left shoulder tight".to_string();
    }

    editor.add_exercise(ExerciseLog::blank());
    editor.add_set(0);
    editor.remove_set(0, 0);

    let form = editor.form();
    assert_eq!(form.name, "Heavy Push");
    assert_eq!(form.notes, "left shoulder tight");
    // still unsaved
    assert_eq!(editor.store().current_workout().unwrap().name, "Push Day");
}

#[test]
fn add_set_on_exercise_without_sets_appends_a_row() {
    let mut editor = SessionEditor::new(WorkoutStore::new(FakeApi::default()));
    editor.apply_template(&WorkoutTemplate {
        id: Some(9),
        user_id: None,
        name: "Mobility".to_string(),
        description: None,
        exercises: vec![TemplateExercise {
            id: None,
            template_id: Some(9),
            exercise_id: "plank".to_string(),
            exercise_name: "Plank".to_string(),
            sets: 0,
            reps: 1,
            weight: 0.0,
        }],
    });
    assert!(editor.store().exercises()[0].sets.is_empty());
    assert_eq!(editor.form().exercises[0].sets.len(), 1);
    editor.form_mut().exercises[0].sets[0].reps = 3;

    editor.add_set(0);

    {
        let form = editor.form();
        let rows = &form.exercises[0].sets;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].reps, 3);
        assert_eq!(rows[1].reps, 3);
        assert!(is_sequential(rows));
    }
    let stored = &editor.store().exercises()[0].sets;
    assert_eq!(stored.len(), 2);
    assert!(is_sequential(stored));
}
