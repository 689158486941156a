//! Store configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `ROCKETSHOES_API_URL` - Base URL of the product API (default: `http://localhost:3333`)
//! - `ROCKETSHOES_STORAGE_DIR` - Directory for the local cart snapshot (default: `.rocketshoes`)
//! - `ROCKETSHOES_REQUEST_TIMEOUT_SECS` - Per-request timeout (default: 10)
//! - `ROCKETSHOES_MAILBOX_SIZE` - Cart actor mailbox capacity (default: 32)

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_API_URL: &str = "http://localhost:3333";
const DEFAULT_STORAGE_DIR: &str = ".rocketshoes";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAILBOX_SIZE: usize = 32;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub api_url: String,
    pub storage_dir: PathBuf,
    pub request_timeout: Duration,
    pub mailbox_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            mailbox_size: DEFAULT_MAILBOX_SIZE,
        }
    }
}

impl StoreConfig {
    /// Load configuration from the process environment.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let timeout_secs = parse_positive::<u64>(
            "ROCKETSHOES_REQUEST_TIMEOUT_SECS",
            &get("ROCKETSHOES_REQUEST_TIMEOUT_SECS", &DEFAULT_TIMEOUT_SECS.to_string()),
        )?;
        let mailbox_size = parse_positive::<usize>(
            "ROCKETSHOES_MAILBOX_SIZE",
            &get("ROCKETSHOES_MAILBOX_SIZE", &DEFAULT_MAILBOX_SIZE.to_string()),
        )?;

        let api_url = get("ROCKETSHOES_API_URL", DEFAULT_API_URL);
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidEnvVar(
                "ROCKETSHOES_API_URL".to_string(),
                format!("expected an http(s) URL, got {api_url:?}"),
            ));
        }

        Ok(Self {
            api_url,
            storage_dir: PathBuf::from(get("ROCKETSHOES_STORAGE_DIR", DEFAULT_STORAGE_DIR)),
            request_timeout: Duration::from_secs(timeout_secs),
            mailbox_size,
        })
    }
}

fn parse_positive<N>(name: &str, raw: &str) -> Result<N, ConfigError>
where
    N: std::str::FromStr + PartialOrd + Default,
    N::Err: std::fmt::Display,
{
    let value = raw
        .trim()
        .parse::<N>()
        .map_err(|e| ConfigError::InvalidEnvVar(name.to_string(), e.to_string()))?;
    if value <= N::default() {
        return Err(ConfigError::InvalidEnvVar(
            name.to_string(),
            "must be greater than zero".to_string(),
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StoreConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = StoreConfig::from_lookup(lookup(&[
            ("ROCKETSHOES_API_URL", "https://api.example.com"),
            ("ROCKETSHOES_STORAGE_DIR", "/tmp/cart"),
            ("ROCKETSHOES_REQUEST_TIMEOUT_SECS", "3"),
            ("ROCKETSHOES_MAILBOX_SIZE", "8"),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "https://api.example.com");
        assert_eq!(config.storage_dir, PathBuf::from("/tmp/cart"));
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.mailbox_size, 8);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = StoreConfig::from_lookup(lookup(&[("ROCKETSHOES_MAILBOX_SIZE", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref name, _) if name == "ROCKETSHOES_MAILBOX_SIZE"));

        let err = StoreConfig::from_lookup(lookup(&[("ROCKETSHOES_REQUEST_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref name, _) if name == "ROCKETSHOES_REQUEST_TIMEOUT_SECS"));

        assert!(StoreConfig::from_lookup(lookup(&[("ROCKETSHOES_API_URL", "localhost:3333")])).is_err());
    }
}
