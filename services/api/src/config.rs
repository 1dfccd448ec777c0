//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::collections::HashSet;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    /// The set of shared secrets that grant access to the form.
    pub accepted_passwords: HashSet<String>,
    pub openai_api_key: String,
    /// Identifies which pre-configured assistant persona drafts the speeches.
    pub assistant_id: String,
    /// How long to wait between run status polls.
    pub poll_interval: Duration,
    /// How long a run may stay pending before the poll gives up.
    pub poll_timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Load Server Settings ---
        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Load Secrets (all required; absence is fatal at startup) ---
        let passwords_str = std::env::var("ACCEPTED_PASSWORDS")
            .map_err(|_| ConfigError::MissingVar("ACCEPTED_PASSWORDS".to_string()))?;
        let accepted_passwords = parse_password_list(&passwords_str);
        if accepted_passwords.is_empty() {
            return Err(ConfigError::InvalidValue(
                "ACCEPTED_PASSWORDS".to_string(),
                "the list contains no non-empty entries".to_string(),
            ));
        }

        let openai_api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| ConfigError::MissingVar("OPENAI_API_KEY".to_string()))?;

        let assistant_id = std::env::var("ASSISTANT_ID")
            .map_err(|_| ConfigError::MissingVar("ASSISTANT_ID".to_string()))?;

        // --- Load Poll Settings ---
        let poll_interval = duration_var("RUN_POLL_INTERVAL_SECS", 2)?;
        let poll_timeout = duration_var("RUN_POLL_TIMEOUT_SECS", 300)?;

        Ok(Self {
            bind_address,
            log_level,
            accepted_passwords,
            openai_api_key,
            assistant_id,
            poll_interval,
            poll_timeout,
        })
    }
}

/// Splits a comma-separated password list, dropping blank entries.
fn parse_password_list(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads an environment variable as a whole number of seconds.
fn duration_var(name: &str, default_secs: u64) -> Result<Duration, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| {
                ConfigError::InvalidValue(
                    name.to_string(),
                    format!("'{}' is not a whole number of seconds", raw),
                )
            }),
        Err(_) => Ok(Duration::from_secs(default_secs)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_list_splits_on_commas_and_trims() {
        let passwords = parse_password_list("alpha, beta ,,gamma");
        assert_eq!(passwords.len(), 3);
        assert!(passwords.contains("beta"));
    }

    #[test]
    fn password_list_of_blanks_is_empty() {
        assert!(parse_password_list(" , ,").is_empty());
    }
}
