use std::path::PathBuf;

use crate::error::{ClientError, ClientResult};

/// Default API base, matching the development server.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/";

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// API base URL; collection paths are joined onto it.
    pub api_url: String,
    /// Per-request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Where the session token is persisted. `None` keeps it in memory.
    pub token_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: 30,
            token_file: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                       |
    /// |-------------------------------|-------------------------------|
    /// | `DREAMS_API_URL`              | `http://localhost:8000/api/`  |
    /// | `DREAMS_REQUEST_TIMEOUT_SECS` | `30`                          |
    /// | `DREAMS_TOKEN_FILE`           | unset (in-memory token store) |
    pub fn from_env() -> ClientResult<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_url = var("DREAMS_API_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.api_url);

        let request_timeout_secs = match var("DREAMS_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                ClientError::Config(format!(
                    "DREAMS_REQUEST_TIMEOUT_SECS must be a valid u64, got {raw:?}"
                ))
            })?,
            None => defaults.request_timeout_secs,
        };

        let token_file = var("DREAMS_TOKEN_FILE")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            api_url,
            request_timeout_secs,
            token_file,
        })
    }
}
