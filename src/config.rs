use std::env;
use std::path::PathBuf;

use crate::error::{Result, WorkoutError};

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub data_dir: PathBuf,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            data_dir: default_data_dir(),
            log_filter: "info".to_string(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("workout-log")
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let api_base_url = lookup("WORKOUT_API_URL").unwrap_or(defaults.api_base_url);
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(WorkoutError::Config(format!(
                "WORKOUT_API_URL must be an http(s) URL, got {api_base_url:?}"
            )));
        }

        let request_timeout_secs = match lookup("WORKOUT_API_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                WorkoutError::Config(format!("WORKOUT_API_TIMEOUT_SECS is not a number: {raw:?}"))
            })?,
            None => defaults.request_timeout_secs,
        };

        Ok(Self {
            api_base_url,
            request_timeout_secs,
            data_dir: lookup("WORKOUT_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            log_filter: lookup("RUST_LOG").unwrap_or(defaults.log_filter),
        })
    }

    pub fn token_path(&self) -> PathBuf {
        self.data_dir.join("tokens.json")
    }
}
