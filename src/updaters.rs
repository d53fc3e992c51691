//! Pure state transitions for the workout store.
//!
//! Every function takes the previous state by reference and returns a new
//! one. When a session is present it is cloned before being changed, so a new
//! state never shares its exercise or set vectors with the previous state.

use std::rc::Rc;

use crate::models::{
    ExerciseLog, ExercisePatch, ExerciseSet, SetPatch, WorkoutDetails, WorkoutSession,
};
use crate::numbering;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkoutState {
    pub current_workout: Option<Rc<WorkoutSession>>,
    pub loading: bool,
    pub error: Option<String>,
}

impl WorkoutState {
    pub fn exercises(&self) -> &[ExerciseLog] {
        self.current_workout
            .as_deref()
            .map(|workout| workout.exercises.as_slice())
            .unwrap_or(&[])
    }

    pub fn has_exercises(&self) -> bool {
        !self.exercises().is_empty()
    }
}

/// Starting a load clears any previous error.
pub fn set_loading(state: &WorkoutState, loading: bool) -> WorkoutState {
    WorkoutState {
        current_workout: state.current_workout.clone(),
        loading,
        error: if loading { None } else { state.error.clone() },
    }
}

pub fn set_error(state: &WorkoutState, error: impl Into<String>) -> WorkoutState {
    WorkoutState {
        current_workout: state.current_workout.clone(),
        loading: false,
        error: Some(error.into()),
    }
}

pub fn set_current_workout(_state: &WorkoutState, workout: Option<WorkoutSession>) -> WorkoutState {
    WorkoutState {
        current_workout: workout.map(Rc::new),
        loading: false,
        error: None,
    }
}

fn with_workout(state: &WorkoutState, edit: impl FnOnce(&mut WorkoutSession)) -> WorkoutState {
    let Some(current) = state.current_workout.as_deref() else {
        return state.clone();
    };

    let mut workout = current.clone();
    edit(&mut workout);

    WorkoutState {
        current_workout: Some(Rc::new(workout)),
        loading: state.loading,
        error: state.error.clone(),
    }
}

fn with_exercise(
    state: &WorkoutState,
    index: usize,
    edit: impl FnOnce(&mut ExerciseLog),
) -> WorkoutState {
    with_workout(state, |workout| {
        if let Some(exercise) = workout.exercises.get_mut(index) {
            edit(exercise);
        }
    })
}

pub fn update_details(state: &WorkoutState, details: &WorkoutDetails) -> WorkoutState {
    with_workout(state, |workout| details.apply_to(workout))
}

pub fn add_exercise(state: &WorkoutState, exercise: ExerciseLog) -> WorkoutState {
    with_workout(state, |workout| workout.exercises.push(exercise))
}

pub fn update_exercise(state: &WorkoutState, index: usize, patch: &ExercisePatch) -> WorkoutState {
    with_exercise(state, index, |exercise| patch.apply_to(exercise))
}

pub fn remove_exercise(state: &WorkoutState, index: usize) -> WorkoutState {
    with_workout(state, |workout| {
        if index < workout.exercises.len() {
            workout.exercises.remove(index);
        }
    })
}

pub fn add_set(state: &WorkoutState, exercise_index: usize, set: ExerciseSet) -> WorkoutState {
    with_exercise(state, exercise_index, |exercise| exercise.sets.push(set))
}

pub fn update_set(
    state: &WorkoutState,
    exercise_index: usize,
    set_index: usize,
    patch: &SetPatch,
) -> WorkoutState {
    with_exercise(state, exercise_index, |exercise| {
        if let Some(set) = exercise.sets.get_mut(set_index) {
            patch.apply_to(set);
        }
    })
}

/// Leaves set numbers as they are; see [`renumber_sets`].
pub fn remove_set(state: &WorkoutState, exercise_index: usize, set_index: usize) -> WorkoutState {
    with_exercise(state, exercise_index, |exercise| {
        if set_index < exercise.sets.len() {
            exercise.sets.remove(set_index);
        }
    })
}

pub fn renumber_sets(state: &WorkoutState, exercise_index: usize) -> WorkoutState {
    with_exercise(state, exercise_index, |exercise| {
        numbering::renumber(&mut exercise.sets)
    })
}
