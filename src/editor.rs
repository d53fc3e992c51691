//! Keeps the editable form in step with the workout store.
//!
//! The editor subscribes to session changes and rebuilds the form from
//! scratch on each one, counting rebuilds as it goes. Structural edits run in
//! two phases: capture the form and mutate the store, then, once the counter
//! shows a rebuild happened, restore captured values, renumber sets and
//! reconcile panel state.

use std::cell::{Cell, Ref, RefCell, RefMut};
use std::rc::Rc;

use tracing::debug;

use crate::api::WorkoutApi;
use crate::error::FormError;
use crate::form::{FormSnapshot, WorkoutForm};
use crate::models::{ExerciseLog, ExerciseSet, NewSession, WorkoutTemplate};
use crate::panels::PanelState;
use crate::signal::Subscription;
use crate::store::WorkoutStore;
use crate::template;

pub struct SessionEditor<A> {
    store: WorkoutStore<A>,
    form: Rc<RefCell<WorkoutForm>>,
    rebuilds: Rc<Cell<u64>>,
    panels: PanelState,
    _subscription: Subscription,
}

impl<A: WorkoutApi> SessionEditor<A> {
    pub fn new(store: WorkoutStore<A>) -> Self {
        let form = Rc::new(RefCell::new(WorkoutForm::default()));
        let rebuilds = Rc::new(Cell::new(0));

        let subscription = {
            let form = Rc::clone(&form);
            let rebuilds = Rc::clone(&rebuilds);
            store.subscribe_workout(move |workout| {
                if let Some(workout) = workout {
                    form.borrow_mut().rebuild(workout);
                    rebuilds.set(rebuilds.get() + 1);
                }
            })
        };

        Self {
            store,
            form,
            rebuilds,
            panels: PanelState::default(),
            _subscription: subscription,
        }
    }

    pub fn store(&self) -> &WorkoutStore<A> {
        &self.store
    }

    /// The persistence collaborator, for settings such as credentials that do
    /// not touch the session.
    pub fn api_mut(&mut self) -> &mut A {
        self.store.api_mut()
    }

    pub fn form(&self) -> Ref<'_, WorkoutForm> {
        self.form.borrow()
    }

    /// Direct access for typing into fields. Values written here are kept
    /// across structural edits but only reach the store on save.
    pub fn form_mut(&self) -> RefMut<'_, WorkoutForm> {
        self.form.borrow_mut()
    }

    pub fn panels(&self) -> &PanelState {
        &self.panels
    }

    pub fn panels_mut(&mut self) -> &mut PanelState {
        &mut self.panels
    }

    /// Number of form rebuilds so far.
    pub fn generation(&self) -> u64 {
        self.rebuilds.get()
    }

    pub fn initialize(&mut self, params: NewSession) {
        self.panels.clear();
        self.store.initialize(params);
    }

    pub fn apply_template(&mut self, template: &WorkoutTemplate) {
        debug!(template = %template.name, "starting workout from template");
        self.initialize(template::session_from_template(template));
    }

    pub fn load(&mut self, id: &str) {
        let before = self.generation();
        self.store.load(id);
        if self.generation() != before {
            self.panels.clear();
        }
    }

    pub fn add_exercise(&mut self, exercise: ExerciseLog) {
        let snapshot = self.form().capture();
        let before = self.generation();

        self.store.add_exercise(exercise);

        if self.rebuild_complete(before, &snapshot) {
            let new_index = self.form().exercises.len().saturating_sub(1);
            self.panels.set_expanded(new_index, true);
        }
    }

    pub fn remove_exercise(&mut self, index: usize) {
        let mut snapshot = self.form().capture();
        snapshot.remove_exercise(index);
        let before = self.generation();

        self.store.remove_exercise(index);

        if self.generation() != before {
            self.panels.remove(index);
        }
        self.rebuild_complete(before, &snapshot);
    }

    /// Appends a set that copies the load of the last set row on screen.
    ///
    /// An exercise stored without sets still shows one blank row; that row is
    /// written to the store first so the new set lands after it.
    pub fn add_set(&mut self, exercise_index: usize) {
        let stored = self
            .store
            .exercises()
            .get(exercise_index)
            .map_or(0, |exercise| exercise.sets.len());
        let Some((pending, set)) = self.form().exercises.get(exercise_index).map(|row| {
            let pending: Vec<ExerciseSet> =
                row.sets.iter().skip(stored).map(ExerciseSet::from).collect();
            (pending, row.next_set())
        }) else {
            return;
        };
        let snapshot = self.form().capture();
        let before = self.generation();

        for placeholder in pending {
            self.store.add_set(exercise_index, placeholder);
        }
        self.store.add_set(exercise_index, set);
        self.store.renumber_sets(exercise_index);

        if self.rebuild_complete(before, &snapshot) {
            self.form.borrow_mut().renumber_sets(exercise_index);
        }
    }

    pub fn remove_set(&mut self, exercise_index: usize, set_index: usize) {
        let mut snapshot = self.form().capture();
        snapshot.remove_set(exercise_index, set_index);
        let before = self.generation();

        self.store.remove_set(exercise_index, set_index);
        self.store.renumber_sets(exercise_index);

        if self.rebuild_complete(before, &snapshot) {
            self.form.borrow_mut().renumber_sets(exercise_index);
        }
    }

    /// Second phase of a structural edit. Returns false when the store did
    /// not emit a new session, in which case the form was never torn down.
    fn rebuild_complete(&mut self, before: u64, snapshot: &FormSnapshot) -> bool {
        if self.generation() == before {
            return false;
        }
        let mut form = self.form.borrow_mut();
        form.restore(snapshot);
        self.panels.truncate(form.exercises.len());
        true
    }

    /// Pushes the form into the store, then saves.
    pub fn save(&mut self) -> Result<(), FormError> {
        self.fold_into_store()?;
        self.store.save();
        Ok(())
    }

    /// Pushes the form into the store, then stamps the end time and saves.
    pub fn finish(&mut self) -> Result<(), FormError> {
        self.fold_into_store()?;
        self.store.finish();
        Ok(())
    }

    pub fn delete(&mut self) {
        self.store.delete();
        if self.store.current_workout().is_none() {
            self.panels.clear();
            *self.form.borrow_mut() = WorkoutForm::default();
        }
    }

    fn fold_into_store(&mut self) -> Result<(), FormError> {
        // Every store call below rebuilds the form, so read it all up front.
        let (details, patches) = {
            let form = self.form();
            form.validate()?;
            (form.details(), form.exercise_patches())
        };

        self.store.update_details(&details);
        for (index, patch) in patches.iter().enumerate() {
            self.store.update_exercise(index, patch);
        }
        Ok(())
    }
}
