//models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_WORKOUT_NAME: &str = "My Workout";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseSet {
    pub set_number: u32,
    pub weight: f32,
    pub reps: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpe: Option<u8>,
    #[serde(default)]
    pub completed: bool,
}

impl ExerciseSet {
    pub fn new(set_number: u32, weight: f32, reps: u32) -> Self {
        Self {
            set_number,
            weight,
            reps,
            rpe: None,
            completed: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseLog {
    pub exercise_id: String,
    pub name: String,
    #[serde(default)]
    pub muscle_group: String,
    #[serde(default)]
    pub sets: Vec<ExerciseSet>,
}

impl ExerciseLog {
    /// A placeholder exercise with a single empty set, as added from the editor.
    pub fn blank() -> Self {
        Self {
            exercise_id: String::new(),
            name: "New Exercise".to_string(),
            muscle_group: String::new(),
            sets: vec![ExerciseSet::new(1, 0.0, 0)],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub name: String,
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<i64>,
    #[serde(default)]
    pub exercises: Vec<ExerciseLog>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl WorkoutSession {
    pub fn is_finished(&self) -> bool {
        self.end_time.is_some()
    }
}

/// Partial session used to start a fresh editing session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewSession {
    pub name: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub exercises: Option<Vec<ExerciseLog>>,
    pub template_id: Option<i64>,
}

impl NewSession {
    pub fn into_session(self) -> WorkoutSession {
        WorkoutSession {
            id: None,
            user_id: None,
            name: self
                .name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| DEFAULT_WORKOUT_NAME.to_string()),
            start_time: self.start_time.unwrap_or_else(Utc::now),
            end_time: None,
            template_id: self.template_id,
            exercises: self.exercises.unwrap_or_default(),
            notes: None,
        }
    }
}

/// Header fields merged into the current session. `None` leaves a field alone.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkoutDetails {
    pub name: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub template_id: Option<i64>,
}

impl WorkoutDetails {
    pub fn apply_to(&self, session: &mut WorkoutSession) {
        if let Some(name) = &self.name {
            session.name = name.clone();
        }
        if let Some(start_time) = self.start_time {
            session.start_time = start_time;
        }
        if let Some(end_time) = self.end_time {
            session.end_time = Some(end_time);
        }
        if let Some(notes) = &self.notes {
            session.notes = Some(notes.clone());
        }
        if let Some(template_id) = self.template_id {
            session.template_id = Some(template_id);
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExercisePatch {
    pub exercise_id: Option<String>,
    pub name: Option<String>,
    pub muscle_group: Option<String>,
    pub sets: Option<Vec<ExerciseSet>>,
}

impl ExercisePatch {
    pub fn apply_to(&self, exercise: &mut ExerciseLog) {
        if let Some(exercise_id) = &self.exercise_id {
            exercise.exercise_id = exercise_id.clone();
        }
        if let Some(name) = &self.name {
            exercise.name = name.clone();
        }
        if let Some(muscle_group) = &self.muscle_group {
            exercise.muscle_group = muscle_group.clone();
        }
        if let Some(sets) = &self.sets {
            exercise.sets = sets.clone();
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SetPatch {
    pub weight: Option<f32>,
    pub reps: Option<u32>,
    pub rpe: Option<u8>,
    pub completed: Option<bool>,
}

impl SetPatch {
    pub fn apply_to(&self, set: &mut ExerciseSet) {
        if let Some(weight) = self.weight {
            set.weight = weight;
        }
        if let Some(reps) = self.reps {
            set.reps = reps;
        }
        if let Some(rpe) = self.rpe {
            set.rpe = Some(rpe);
        }
        if let Some(completed) = self.completed {
            set.completed = completed;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateExercise {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<i64>,
    pub exercise_id: String,
    pub exercise_name: String,
    pub sets: u32,
    pub reps: u32,
    pub weight: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub exercises: Vec<TemplateExercise>,
}
