use chrono::Utc;

use crate::models::{ExerciseLog, ExerciseSet, NewSession, TemplateExercise, WorkoutTemplate};

impl From<&TemplateExercise> for ExerciseLog {
    fn from(prototype: &TemplateExercise) -> Self {
        Self {
            exercise_id: prototype.exercise_id.clone(),
            name: prototype.exercise_name.clone(),
            muscle_group: String::new(),
            sets: (1..=prototype.sets)
                .map(|number| ExerciseSet::new(number, prototype.weight, prototype.reps))
                .collect(),
        }
    }
}

/// Seed for a fresh session that starts now and follows `template`.
pub fn session_from_template(template: &WorkoutTemplate) -> NewSession {
    NewSession {
        name: Some(template.name.clone()),
        start_time: Some(Utc::now()),
        exercises: Some(template.exercises.iter().map(ExerciseLog::from).collect()),
        template_id: template.id,
    }
}
