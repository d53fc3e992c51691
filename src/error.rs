use thiserror::Error;

/// Errors raised by the workout collaborators, storage and configuration.
#[derive(Debug, Error)]
pub enum WorkoutError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("No workout to save")]
    NoWorkout,
}

impl WorkoutError {
    /// Text for the store's error field: the server's own message when it
    /// rejected the request, the full description otherwise.
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WorkoutError>;

/// Validation failures of the editable form tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("workout name is required")]
    MissingWorkoutName,

    #[error("exercise {} needs a name", index + 1)]
    MissingExerciseName { index: usize },
}
