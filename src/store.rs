//! Authoritative holder of the workout being edited.
//!
//! Every change goes through one of the operations below, each of which
//! computes a new [`WorkoutState`] with a pure updater and publishes it to
//! subscribers. Collaborator calls are single-attempt; failures land in
//! `WorkoutState::error` and never propagate to the caller.

use std::rc::Rc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::api::WorkoutApi;
use crate::error::WorkoutError;
use crate::models::{
    ExerciseLog, ExercisePatch, ExerciseSet, NewSession, SetPatch, WorkoutDetails, WorkoutSession,
};
use crate::signal::{Signal, Subscription};
use crate::updaters::{self, WorkoutState};

pub struct WorkoutStore<A> {
    api: A,
    state: Rc<WorkoutState>,
    signal: Signal<WorkoutState>,
}

impl<A: WorkoutApi> WorkoutStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: Rc::new(WorkoutState::default()),
            signal: Signal::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn api_mut(&mut self) -> &mut A {
        &mut self.api
    }

    pub fn state(&self) -> Rc<WorkoutState> {
        Rc::clone(&self.state)
    }

    pub fn current_workout(&self) -> Option<Rc<WorkoutSession>> {
        self.state.current_workout.clone()
    }

    pub fn loading(&self) -> bool {
        self.state.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub fn exercises(&self) -> &[ExerciseLog] {
        self.state.exercises()
    }

    pub fn has_exercises(&self) -> bool {
        self.state.has_exercises()
    }

    /// Calls `callback` with the current state now and with every later state.
    pub fn subscribe<F>(&self, mut callback: F) -> Subscription
    where
        F: FnMut(&Rc<WorkoutState>) + 'static,
    {
        callback(&self.state);
        self.signal.subscribe(callback)
    }

    /// Like [`subscribe`](Self::subscribe), but only fires when the current
    /// session is replaced by a different one.
    pub fn subscribe_workout<F>(&self, mut callback: F) -> Subscription
    where
        F: FnMut(Option<&Rc<WorkoutSession>>) + 'static,
    {
        let mut last = self.state.current_workout.clone();
        callback(last.as_ref());
        self.signal.subscribe(move |state: &Rc<WorkoutState>| {
            let next = &state.current_workout;
            let unchanged = match (&last, next) {
                (Some(a), Some(b)) => Rc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            };
            if !unchanged {
                last = next.clone();
                callback(last.as_ref());
            }
        })
    }

    fn commit(&mut self, next: WorkoutState) {
        self.state = Rc::new(next);
        self.signal.publish(&self.state);
    }

    pub fn initialize(&mut self, params: NewSession) {
        self.commit(updaters::set_loading(&self.state, true));
        let workout = params.into_session();
        debug!(name = %workout.name, exercises = workout.exercises.len(), "initializing workout");
        self.commit(updaters::set_current_workout(&self.state, Some(workout)));
    }

    pub fn set_current_workout(&mut self, workout: Option<WorkoutSession>) {
        self.commit(updaters::set_current_workout(&self.state, workout));
    }

    pub fn load(&mut self, id: &str) {
        self.commit(updaters::set_loading(&self.state, true));
        match self.api.get_workout(id) {
            Ok(workout) => {
                info!(workout_id = id, "loaded workout");
                self.commit(updaters::set_current_workout(&self.state, Some(workout)));
            }
            Err(err) => {
                warn!(workout_id = id, error = %err, "failed to load workout");
                self.commit(updaters::set_error(&self.state, err.user_message()));
            }
        }
    }

    pub fn update_details(&mut self, details: &WorkoutDetails) {
        self.commit(updaters::update_details(&self.state, details));
    }

    pub fn add_exercise(&mut self, exercise: ExerciseLog) {
        debug!(name = %exercise.name, "adding exercise");
        self.commit(updaters::add_exercise(&self.state, exercise));
    }

    pub fn update_exercise(&mut self, index: usize, patch: &ExercisePatch) {
        self.commit(updaters::update_exercise(&self.state, index, patch));
    }

    pub fn remove_exercise(&mut self, index: usize) {
        debug!(index, "removing exercise");
        self.commit(updaters::remove_exercise(&self.state, index));
    }

    pub fn add_set(&mut self, exercise_index: usize, set: ExerciseSet) {
        debug!(exercise_index, set_number = set.set_number, "adding set");
        self.commit(updaters::add_set(&self.state, exercise_index, set));
    }

    pub fn update_set(&mut self, exercise_index: usize, set_index: usize, patch: &SetPatch) {
        self.commit(updaters::update_set(&self.state, exercise_index, set_index, patch));
    }

    /// Callers are expected to follow with [`renumber_sets`](Self::renumber_sets).
    pub fn remove_set(&mut self, exercise_index: usize, set_index: usize) {
        debug!(exercise_index, set_index, "removing set");
        self.commit(updaters::remove_set(&self.state, exercise_index, set_index));
    }

    pub fn renumber_sets(&mut self, exercise_index: usize) {
        self.commit(updaters::renumber_sets(&self.state, exercise_index));
    }

    /// Creates the session when it has no id yet, otherwise updates it.
    pub fn save(&mut self) {
        let Some(workout) = self.state.current_workout.clone() else {
            warn!("save requested without a workout");
            self.commit(updaters::set_error(&self.state, WorkoutError::NoWorkout.user_message()));
            return;
        };

        self.commit(updaters::set_loading(&self.state, true));
        let result = match workout.id.as_deref() {
            Some(id) => self.api.update_workout(id, &workout),
            None => self.api.create_workout(&workout),
        };

        match result {
            Ok(saved) => {
                info!(workout_id = saved.id.as_deref().unwrap_or("-"), "saved workout");
                self.commit(updaters::set_current_workout(&self.state, Some(saved)));
            }
            Err(err) => {
                warn!(error = %err, "failed to save workout");
                self.commit(updaters::set_error(&self.state, err.user_message()));
            }
        }
    }

    pub fn finish(&mut self) {
        if let Some(current) = self.state.current_workout.as_deref() {
            let mut finished = current.clone();
            finished.end_time = Some(Utc::now());
            self.commit(updaters::set_current_workout(&self.state, Some(finished)));
        }
        self.save();
    }

    /// Deletes the persisted session, if any, and clears the editor.
    pub fn delete(&mut self) {
        let Some(id) = self
            .state
            .current_workout
            .as_deref()
            .and_then(|workout| workout.id.clone())
        else {
            self.commit(updaters::set_current_workout(&self.state, None));
            return;
        };

        self.commit(updaters::set_loading(&self.state, true));
        match self.api.delete_workout(&id) {
            Ok(()) => {
                info!(workout_id = %id, "deleted workout");
                self.commit(updaters::set_current_workout(&self.state, None));
            }
            Err(err) => {
                warn!(workout_id = %id, error = %err, "failed to delete workout");
                self.commit(updaters::set_error(&self.state, err.user_message()));
            }
        }
    }
}
