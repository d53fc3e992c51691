//! Workout session editing: a store that owns the session being logged, an
//! editable form kept in step with it, and the REST collaborators that
//! persist it.

pub mod api;
pub mod config;
pub mod editor;
pub mod error;
pub mod form;
pub mod history;
pub mod logging;
pub mod models;
pub mod numbering;
pub mod panels;
pub mod signal;
pub mod storage;
pub mod store;
pub mod template;
pub mod updaters;

pub use api::{ApiClient, TemplateApi, WorkoutApi};
pub use config::Config;
pub use editor::SessionEditor;
pub use error::{FormError, Result, WorkoutError};
pub use history::HistoryFilter;
pub use models::{ExerciseLog, ExerciseSet, NewSession, WorkoutSession, WorkoutTemplate};
pub use store::WorkoutStore;
pub use updaters::WorkoutState;
