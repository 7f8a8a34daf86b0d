//! Centralized configuration.
//!
//! Loaded from environment variables (with optional `.env`) and validated
//! up front.

use crate::error::TokenError;
use crate::jwt::DEFAULT_CLOCK_SKEW_SECONDS;
use crate::telemetry::TracingConfig;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default credential store location, relative to the working directory.
pub const DEFAULT_STORE_PATH: &str = ".credentials/stored_credentials.json";

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Credential store file
    pub store_path: PathBuf,
    /// Clock skew tolerated by token verification
    pub clock_skew: Duration,
    /// How long before expiry a stored access token counts as stale
    pub refresh_window: Duration,
    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,
    /// Emit JSON logs
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            clock_skew: Duration::from_secs(DEFAULT_CLOCK_SKEW_SECONDS),
            refresh_window: Duration::from_secs(60),
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparsable value.
    pub fn from_env() -> Result<Self, TokenError> {
        dotenvy::dotenv().ok();

        let store_path = env::var("CREDENTIAL_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORE_PATH));
        let clock_skew = Duration::from_secs(parse_env(
            "TOKEN_CLOCK_SKEW_SECONDS",
            DEFAULT_CLOCK_SKEW_SECONDS,
        )?);
        let refresh_window = Duration::from_secs(parse_env("TOKEN_REFRESH_WINDOW_SECONDS", 60)?);
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_json = parse_env("LOG_JSON", false)?;

        if store_path.as_os_str().is_empty() {
            return Err(TokenError::config("CREDENTIAL_STORE_PATH must not be empty"));
        }

        Ok(Self {
            store_path,
            clock_skew,
            refresh_window,
            log_level,
            log_json,
        })
    }

    /// Tracing settings derived from this configuration.
    #[must_use]
    pub fn tracing(&self) -> TracingConfig {
        let config = TracingConfig::default().with_log_level(self.log_level.clone());
        if self.log_json {
            config.with_json_output()
        } else {
            config
        }
    }
}

/// Parse environment variable with default value.
fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T, TokenError>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => val
            .parse()
            .map_err(|e| TokenError::config(format!("Invalid {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}
