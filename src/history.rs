//! Past workouts shown next to the editor.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::api::WorkoutApi;
use crate::error::Result;
use crate::models::WorkoutSession;

/// Which past workouts to list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HistoryFilter {
    #[default]
    All,
    /// Workouts started within the last `n` days.
    LastDays(u32),
    /// Workouts started from one template.
    Template(i64),
}

impl HistoryFilter {
    /// Fetches matching workouts, newest first.
    pub fn fetch<A: WorkoutApi>(self, api: &A, now: DateTime<Utc>) -> Result<Vec<WorkoutSession>> {
        debug!(filter = %self, "listing workout history");
        let mut workouts = match self {
            HistoryFilter::All => api.list_workouts()?,
            HistoryFilter::LastDays(days) => {
                api.list_workouts_in_range(now - Duration::days(i64::from(days)), now)?
            }
            HistoryFilter::Template(id) => api.list_workouts_by_template(id)?,
        };
        workouts.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(workouts)
    }
}

impl fmt::Display for HistoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryFilter::All => write!(f, "All workouts"),
            HistoryFilter::LastDays(1) => write!(f, "Last day"),
            HistoryFilter::LastDays(days) => write!(f, "Last {days} days"),
            HistoryFilter::Template(id) => write!(f, "Template #{id}"),
        }
    }
}
