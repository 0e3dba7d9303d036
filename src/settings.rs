#![cfg(feature = "std")]

//! Runtime settings read from the environment.

use std::env;
use std::time::Duration;

use crate::config::DEFAULT_OPPONENT_DELAY_MS;

pub const API_URL_ENV: &str = "ARCADE_API_URL";
pub const TOKEN_ENV: &str = "ARCADE_TOKEN";
pub const DELAY_ENV: &str = "ARCADE_OPPONENT_DELAY_MS";

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Base URL of the scoreboard service.
    pub api_url: String,
    /// Bearer token; `None` means anonymous play and no score reporting.
    pub token: Option<String>,
    pub opponent_delay: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            opponent_delay: Duration::from_millis(DEFAULT_OPPONENT_DELAY_MS),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from any key lookup. Blank values count as unset and
    /// unparsable delays fall back to the default with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let opponent_delay = match read(DELAY_ENV) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(ms) => Duration::from_millis(ms),
                Err(_) => {
                    log::warn!(
                        "{} ({}) is not a number of milliseconds. Using {}ms.",
                        DELAY_ENV,
                        raw,
                        DEFAULT_OPPONENT_DELAY_MS
                    );
                    defaults.opponent_delay
                }
            },
            None => defaults.opponent_delay,
        };

        Self {
            api_url: read(API_URL_ENV)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            token: read(TOKEN_ENV),
            opponent_delay,
        }
    }
}
