//! REST collaborators for workout sessions and templates.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::error::{Result, WorkoutError};
use crate::models::{TemplateExercise, WorkoutSession, WorkoutTemplate};
use crate::storage::KeyValueStore;

/// Key under which the bearer token is kept.
pub const TOKEN_KEY: &str = "jwt";

pub trait WorkoutApi {
    fn get_workout(&self, id: &str) -> Result<WorkoutSession>;
    fn create_workout(&self, session: &WorkoutSession) -> Result<WorkoutSession>;
    fn update_workout(&self, id: &str, session: &WorkoutSession) -> Result<WorkoutSession>;
    fn delete_workout(&self, id: &str) -> Result<()>;
    fn list_workouts(&self) -> Result<Vec<WorkoutSession>>;
    fn list_workouts_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<WorkoutSession>>;
    fn list_workouts_by_template(&self, template_id: i64) -> Result<Vec<WorkoutSession>>;
}

pub trait TemplateApi {
    fn list_templates(&self) -> Result<Vec<WorkoutTemplate>>;
    fn get_template(&self, id: i64) -> Result<WorkoutTemplate>;
}

/// `GET /api/templates/{id}` answers with the template and its exercises side by side.
#[derive(Deserialize)]
struct TemplateDetails {
    template: WorkoutTemplate,
    #[serde(default)]
    exercises: Vec<TemplateExercise>,
}

impl From<TemplateDetails> for WorkoutTemplate {
    fn from(details: TemplateDetails) -> Self {
        let mut template = details.template;
        template.exercises = details.exercises;
        template
    }
}

pub struct ApiClient<S> {
    http: Client,
    base_url: String,
    tokens: S,
}

impl<S: KeyValueStore> ApiClient<S> {
    pub fn new(config: &Config, tokens: S) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    /// Stores the bearer token sent with every later request.
    pub fn sign_in(&mut self, token: &str) -> Result<()> {
        self.tokens.set(TOKEN_KEY, token.trim())
    }

    pub fn sign_out(&mut self) -> Result<()> {
        self.tokens.remove(TOKEN_KEY)
    }

    pub fn is_signed_in(&self) -> bool {
        self.tokens.get(TOKEN_KEY).is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(%method, path, "api request");
        let request = self.http.request(method, self.url(path));
        match self.tokens.get(TOKEN_KEY) {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

fn check(response: reqwest::blocking::Response) -> Result<reqwest::blocking::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(WorkoutError::Status {
        status: status.as_u16(),
        message: error_message(&body, status.canonical_reason().unwrap_or("request failed")),
    })
}

/// Pulls a human readable message out of an error body, which is either
/// `{"message": ...}`, `{"error": ...}` or plain text.
fn error_message(body: &str, fallback: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: Option<String>,
        error: Option<String>,
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed.message.or(parsed.error) {
            return message;
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed.starts_with('{') {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    let response = check(request.send()?)?;
    Ok(response.json()?)
}

impl<S: KeyValueStore> WorkoutApi for ApiClient<S> {
    fn get_workout(&self, id: &str) -> Result<WorkoutSession> {
        send_json(self.request(Method::GET, &format!("/api/workouts/{id}")))
    }

    fn create_workout(&self, session: &WorkoutSession) -> Result<WorkoutSession> {
        send_json(self.request(Method::POST, "/api/workouts").json(session))
    }

    fn update_workout(&self, id: &str, session: &WorkoutSession) -> Result<WorkoutSession> {
        send_json(
            self.request(Method::PUT, &format!("/api/workouts/{id}"))
                .json(session),
        )
    }

    fn delete_workout(&self, id: &str) -> Result<()> {
        check(
            self.request(Method::DELETE, &format!("/api/workouts/{id}"))
                .send()?,
        )?;
        Ok(())
    }

    fn list_workouts(&self) -> Result<Vec<WorkoutSession>> {
        send_json(self.request(Method::GET, "/api/workouts"))
    }

    fn list_workouts_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<WorkoutSession>> {
        send_json(
            self.request(Method::GET, "/api/workouts/range")
                .query(&[("start", start.to_rfc3339()), ("end", end.to_rfc3339())]),
        )
    }

    fn list_workouts_by_template(&self, template_id: i64) -> Result<Vec<WorkoutSession>> {
        send_json(self.request(Method::GET, &format!("/api/workouts/template/{template_id}")))
    }
}

impl<S: KeyValueStore> TemplateApi for ApiClient<S> {
    fn list_templates(&self) -> Result<Vec<WorkoutTemplate>> {
        send_json(self.request(Method::GET, "/api/templates"))
    }

    fn get_template(&self, id: i64) -> Result<WorkoutTemplate> {
        let details: TemplateDetails =
            send_json(self.request(Method::GET, &format!("/api/templates/{id}")))?;
        Ok(details.into())
    }
}
