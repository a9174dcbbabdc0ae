//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ARMOIRE_API_BASE_URL` - Base URL of the catalog backend (e.g., <https://api.example.com/api/v1/>)
//!
//! ## Optional
//! - `ARMOIRE_SESSION_FILE` - Where the bearer-token session is persisted
//!   (default: `$HOME/.config/armoire/session.json`)
//! - `ARMOIRE_HTTP_TIMEOUT_SECS` - Per-request timeout in seconds (default: 30)

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL all endpoint paths are joined onto.
    pub api_base_url: Url,
    /// Path of the persisted session file.
    pub session_file: PathBuf,
    /// Per-request HTTP timeout.
    pub http_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a value
    /// fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_required_env("ARMOIRE_API_BASE_URL")?
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("ARMOIRE_API_BASE_URL".to_string(), e.to_string())
            })?;

        let session_file = match get_optional_env("ARMOIRE_SESSION_FILE") {
            Some(path) => PathBuf::from(path),
            None => {
                let home = get_required_env("HOME").map_err(|_| {
                    ConfigError::MissingEnvVar("ARMOIRE_SESSION_FILE (HOME is unset)".to_string())
                })?;
                default_session_file(&home)
            }
        };

        let http_timeout_secs = get_env_or_default(
            "ARMOIRE_HTTP_TIMEOUT_SECS",
            &DEFAULT_HTTP_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("ARMOIRE_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
        })?;

        Ok(Self {
            api_base_url,
            session_file,
            http_timeout: Duration::from_secs(http_timeout_secs),
        })
    }
}

/// Default session file location relative to a home directory.
fn default_session_file(home: &str) -> PathBuf {
    Path::new(home)
        .join(".config")
        .join("armoire")
        .join("session.json")
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session_file_layout() {
        let path = default_session_file("/home/ops");
        assert_eq!(
            path,
            PathBuf::from("/home/ops/.config/armoire/session.json")
        );
    }

    #[test]
    fn test_get_env_or_default_falls_back() {
        let value = get_env_or_default("ARMOIRE_TEST_UNSET_VARIABLE", "30");
        assert_eq!(value, "30");
    }

    #[test]
    fn test_missing_required_env_is_reported() {
        let err = get_required_env("ARMOIRE_TEST_UNSET_VARIABLE").unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(_)));
        assert!(err.to_string().contains("ARMOIRE_TEST_UNSET_VARIABLE"));
    }

    #[test]
    fn test_base_url_parses() {
        let url = "https://api.example.com/api/v1/".parse::<Url>().unwrap();
        assert_eq!(url.scheme(), "https");
    }
}
