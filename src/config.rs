//! Environment-driven configuration with working defaults.

use std::env;
use std::path::PathBuf;

use tracing::debug;

use crate::api::DEFAULT_BASE_URL;

const DEFAULT_SESSION_FILE: &str = ".snooze_session";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the story service.
    pub base_url: String,
    /// Where the (token, username) pair is persisted between invocations.
    pub session_file: PathBuf,
}

impl Config {
    /// Read configuration from the environment (a `.env` file is honored
    /// when present). Every variable has a default, so loading never fails.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self {
            base_url: var_or("SNOOZE_API_URL", DEFAULT_BASE_URL),
            session_file: PathBuf::from(var_or("SNOOZE_SESSION_FILE", DEFAULT_SESSION_FILE)),
        }
    }
}

fn var_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.is_empty() => value,
        _ => {
            debug!("{key} not set, using default: {default}");
            default.to_string()
        }
    }
}
