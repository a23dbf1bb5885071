use std::fmt;

use crate::error::{ReportError, Result};

/// Environment variable holding the dashboard API base URL.
pub const BASE_URL_VAR: &str = "MERAKI_BASE_URL";
/// Environment variable holding the dashboard API key.
pub const API_KEY_VAR: &str = "API_KEY";

/// Immutable settings required to talk to the dashboard API.
///
/// Loaded once at startup and handed to [`DashboardClient`](crate::api::DashboardClient).
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub api_key: String,
}

impl Config {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Reads the configuration from the process environment, loading a `.env`
    /// file first when one is present.
    pub fn from_env() -> Result<Self> {
        check_env_file(dotenvy::dotenv())?;
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = require(&lookup, BASE_URL_VAR)?;
        let api_key = require(&lookup, API_KEY_VAR)?;
        Ok(Self::new(base_url, api_key))
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// A missing `.env` file is fine; the variables may come from the shell. A
/// file that exists but cannot be read or parsed is an error.
fn check_env_file<T>(loaded: dotenvy::Result<T>) -> Result<()> {
    match loaded {
        Ok(_) => Ok(()),
        Err(error) if error.not_found() => Ok(()),
        Err(error) => Err(ReportError::InvalidConfig(format!(
            "could not load .env file: {error}"
        ))),
    }
}

fn require<F>(lookup: &F, key: &'static str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ReportError::MissingConfig(key)),
    }
}
