//! In-memory stand-in for the workout REST collaborator.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};
use workout_log::api::WorkoutApi;
use workout_log::models::{ExerciseLog, ExerciseSet};
use workout_log::{Result, WorkoutError, WorkoutSession};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Get(String),
    Create,
    Update(String),
    Delete(String),
    List,
    ListRange,
    ListByTemplate(i64),
}

#[derive(Default)]
struct Inner {
    sessions: Vec<WorkoutSession>,
    calls: Vec<Call>,
    fail_with: Option<(u16, String)>,
    next_id: u32,
}

/// Cloning shares the backing state, so a test can keep a handle after
/// moving one into the store.
#[derive(Clone, Default)]
pub struct FakeApi {
    inner: Rc<RefCell<Inner>>,
}

impl FakeApi {
    pub fn with_session(session: WorkoutSession) -> Self {
        Self::with_sessions(vec![session])
    }

    pub fn with_sessions(sessions: Vec<WorkoutSession>) -> Self {
        let api = Self::default();
        api.inner.borrow_mut().sessions = sessions;
        api
    }

    pub fn fail_with(&self, status: u16, message: &str) {
        self.inner.borrow_mut().fail_with = Some((status, message.to_string()));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.borrow().calls.clone()
    }

    pub fn stored(&self, id: &str) -> Option<WorkoutSession> {
        self.inner
            .borrow()
            .sessions
            .iter()
            .find(|s| s.id.as_deref() == Some(id))
            .cloned()
    }

    fn record(&self, call: Call) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        inner.calls.push(call);
        match &inner.fail_with {
            Some((status, message)) => Err(WorkoutError::Status {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl WorkoutApi for FakeApi {
    fn get_workout(&self, id: &str) -> Result<WorkoutSession> {
        self.record(Call::Get(id.to_string()))?;
        self.stored(id).ok_or_else(|| WorkoutError::Status {
            status: 404,
            message: "Workout not found".to_string(),
        })
    }

    fn create_workout(&self, session: &WorkoutSession) -> Result<WorkoutSession> {
        self.record(Call::Create)?;
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let mut created = session.clone();
        created.id = Some(format!("w-{}", inner.next_id));
        created.user_id = Some("athlete".to_string());
        inner.sessions.push(created.clone());
        Ok(created)
    }

    fn update_workout(&self, id: &str, session: &WorkoutSession) -> Result<WorkoutSession> {
        self.record(Call::Update(id.to_string()))?;
        let mut inner = self.inner.borrow_mut();
        let mut updated = session.clone();
        updated.id = Some(id.to_string());
        inner.sessions.retain(|s| s.id.as_deref() != Some(id));
        inner.sessions.push(updated.clone());
        Ok(updated)
    }

    fn delete_workout(&self, id: &str) -> Result<()> {
        self.record(Call::Delete(id.to_string()))?;
        self.inner
            .borrow_mut()
            .sessions
            .retain(|s| s.id.as_deref() != Some(id));
        Ok(())
    }

    fn list_workouts(&self) -> Result<Vec<WorkoutSession>> {
        self.record(Call::List)?;
        Ok(self.inner.borrow().sessions.clone())
    }

    fn list_workouts_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<WorkoutSession>> {
        self.record(Call::ListRange)?;
        Ok(self
            .inner
            .borrow()
            .sessions
            .iter()
            .filter(|s| s.start_time >= start && s.start_time <= end)
            .cloned()
            .collect())
    }

    fn list_workouts_by_template(&self, template_id: i64) -> Result<Vec<WorkoutSession>> {
        self.record(Call::ListByTemplate(template_id))?;
        Ok(self
            .inner
            .borrow()
            .sessions
            .iter()
            .filter(|s| s.template_id == Some(template_id))
            .cloned()
            .collect())
    }
}

pub fn an_hour_ago() -> DateTime<Utc> {
    Utc::now() - Duration::hours(1)
}

pub fn bench_press() -> ExerciseLog {
    ExerciseLog {
        exercise_id: "bench".to_string(),
        name: "Bench Press".to_string(),
        muscle_group: "chest".to_string(),
        sets: vec![ExerciseSet::new(1, 60.0, 8)],
    }
}

pub fn saved_session(id: &str) -> WorkoutSession {
    WorkoutSession {
        id: Some(id.to_string()),
        user_id: Some("athlete".to_string()),
        name: "Upper A".to_string(),
        start_time: an_hour_ago(),
        end_time: None,
        template_id: None,
        exercises: vec![bench_press()],
        notes: Some("warmed up".to_string()),
    }
}
