//! Editable projection of a workout session.
//!
//! The form is rebuilt wholesale from the store whenever the session changes.
//! Values typed into the form survive a rebuild only if they were captured
//! into a [`FormSnapshot`] beforehand and restored afterwards.

use chrono::{DateTime, Utc};

use crate::error::FormError;
use crate::models::{ExerciseLog, ExercisePatch, ExerciseSet, WorkoutDetails, WorkoutSession};
use crate::numbering::{self, Numbered};

#[derive(Clone, Debug, PartialEq)]
pub struct SetRow {
    pub set_number: u32,
    pub weight: f32,
    pub reps: u32,
    pub rpe: Option<u8>,
    pub completed: bool,
}

impl Default for SetRow {
    fn default() -> Self {
        Self {
            set_number: 1,
            weight: 0.0,
            reps: 0,
            rpe: None,
            completed: false,
        }
    }
}

impl From<&ExerciseSet> for SetRow {
    fn from(set: &ExerciseSet) -> Self {
        Self {
            set_number: set.set_number,
            weight: set.weight,
            reps: set.reps,
            rpe: set.rpe,
            completed: set.completed,
        }
    }
}

impl From<&SetRow> for ExerciseSet {
    fn from(row: &SetRow) -> Self {
        Self {
            set_number: row.set_number,
            weight: row.weight,
            reps: row.reps,
            rpe: row.rpe,
            completed: row.completed,
        }
    }
}

impl Numbered for SetRow {
    fn set_number(&self) -> u32 {
        self.set_number
    }

    fn set_set_number(&mut self, number: u32) {
        self.set_number = number;
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExerciseRow {
    pub exercise_id: String,
    pub name: String,
    pub muscle_group: String,
    pub sets: Vec<SetRow>,
}

impl ExerciseRow {
    pub fn summary(&self) -> String {
        match self.sets.len() {
            1 => "1 set".to_string(),
            n => format!("{n} sets"),
        }
    }

    /// The set that follows the current last row: same load, not yet done.
    pub fn next_set(&self) -> ExerciseSet {
        let last = self.sets.last();
        ExerciseSet {
            set_number: self.sets.len() as u32 + 1,
            weight: last.map_or(0.0, |s| s.weight),
            reps: last.map_or(0, |s| s.reps),
            rpe: last.and_then(|s| s.rpe),
            completed: false,
        }
    }

    fn to_patch(&self) -> ExercisePatch {
        ExercisePatch {
            exercise_id: Some(self.exercise_id.clone()),
            name: Some(self.name.clone()),
            muscle_group: Some(self.muscle_group.clone()),
            sets: Some(self.sets.iter().map(ExerciseSet::from).collect()),
        }
    }
}

impl From<&ExerciseLog> for ExerciseRow {
    fn from(exercise: &ExerciseLog) -> Self {
        let sets = if exercise.sets.is_empty() {
            vec![SetRow::default()]
        } else {
            exercise.sets.iter().map(SetRow::from).collect()
        };
        Self {
            exercise_id: exercise.exercise_id.clone(),
            name: exercise.name.clone(),
            muscle_group: exercise.muscle_group.clone(),
            sets,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkoutForm {
    pub name: String,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub template_id: Option<i64>,
    pub notes: String,
    pub exercises: Vec<ExerciseRow>,
}

impl WorkoutForm {
    /// Drops every exercise row and repopulates the form from `workout`.
    pub fn rebuild(&mut self, workout: &WorkoutSession) {
        self.exercises.clear();

        self.name = workout.name.clone();
        self.start_time = Some(workout.start_time);
        self.end_time = workout.end_time;
        self.template_id = workout.template_id;
        self.notes = workout.notes.clone().unwrap_or_default();

        self.exercises
            .extend(workout.exercises.iter().map(ExerciseRow::from));
    }

    pub fn renumber_sets(&mut self, exercise_index: usize) {
        if let Some(row) = self.exercises.get_mut(exercise_index) {
            numbering::renumber(&mut row.sets);
        }
    }

    pub fn validate(&self) -> Result<(), FormError> {
        if self.name.trim().is_empty() {
            return Err(FormError::MissingWorkoutName);
        }
        match self.exercises.iter().position(|row| row.name.trim().is_empty()) {
            Some(index) => Err(FormError::MissingExerciseName { index }),
            None => Ok(()),
        }
    }

    /// Header fields as a details patch.
    pub fn details(&self) -> WorkoutDetails {
        WorkoutDetails {
            name: Some(self.name.clone()),
            start_time: self.start_time,
            end_time: self.end_time,
            notes: Some(self.notes.clone()),
            template_id: self.template_id,
        }
    }

    /// One full patch per exercise row, in row order.
    pub fn exercise_patches(&self) -> Vec<ExercisePatch> {
        self.exercises.iter().map(ExerciseRow::to_patch).collect()
    }

    pub fn capture(&self) -> FormSnapshot {
        FormSnapshot {
            header: CapturedHeader {
                name: self.name.clone(),
                start_time: self.start_time,
                end_time: self.end_time,
                template_id: self.template_id,
                notes: self.notes.clone(),
            },
            exercises: self
                .exercises
                .iter()
                .map(|row| CapturedExercise {
                    exercise_id: row.exercise_id.clone(),
                    name: row.name.clone(),
                    muscle_group: row.muscle_group.clone(),
                    sets: row
                        .sets
                        .iter()
                        .map(|set| CapturedSet {
                            weight: set.weight,
                            reps: set.reps,
                            rpe: set.rpe,
                            completed: set.completed,
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    /// Writes captured header values back, then captured values onto rows
    /// that still exist. Set numbers and rows beyond the snapshot are left as
    /// rebuilt.
    pub fn restore(&mut self, snapshot: &FormSnapshot) {
        let header = &snapshot.header;
        self.name = header.name.clone();
        self.start_time = header.start_time;
        self.end_time = header.end_time;
        self.template_id = header.template_id;
        self.notes = header.notes.clone();

        for (row, captured) in self.exercises.iter_mut().zip(&snapshot.exercises) {
            row.exercise_id = captured.exercise_id.clone();
            row.name = captured.name.clone();
            row.muscle_group = captured.muscle_group.clone();

            for (set, values) in row.sets.iter_mut().zip(&captured.sets) {
                set.weight = values.weight;
                set.reps = values.reps;
                set.rpe = values.rpe;
                set.completed = values.completed;
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
struct CapturedHeader {
    name: String,
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
    template_id: Option<i64>,
    notes: String,
}

#[derive(Clone, Debug, PartialEq)]
struct CapturedSet {
    weight: f32,
    reps: u32,
    rpe: Option<u8>,
    completed: bool,
}

#[derive(Clone, Debug, PartialEq)]
struct CapturedExercise {
    exercise_id: String,
    name: String,
    muscle_group: String,
    sets: Vec<CapturedSet>,
}

/// Values typed into the form at a point in time, indexed by row position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormSnapshot {
    header: CapturedHeader,
    exercises: Vec<CapturedExercise>,
}

impl FormSnapshot {
    #[cfg(test)]
    fn exercise_count(&self) -> usize {
        self.exercises.len()
    }

    /// Shifts later rows up so positions match a list without `index`.
    pub fn remove_exercise(&mut self, index: usize) {
        if index < self.exercises.len() {
            self.exercises.remove(index);
        }
    }

    pub fn remove_set(&mut self, exercise_index: usize, set_index: usize) {
        if let Some(exercise) = self.exercises.get_mut(exercise_index) {
            if set_index < exercise.sets.len() {
                exercise.sets.remove(set_index);
            }
        }
    }
}
