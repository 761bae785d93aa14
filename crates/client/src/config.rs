//! Client configuration read from `X1_*` environment variables.

use std::time::Duration;

/// Default API base URL for a local deployment.
pub const DEFAULT_API_URL: &str = "http://localhost:8190/api";

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Errors raised while reading [`ClientConfig`] from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has an invalid value '{value}'")]
    Invalid { var: &'static str, value: String },
}

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every request path is appended to, without a trailing slash.
    pub api_url: String,
    /// Static bearer token sent as the `Authorization` header, if set.
    pub api_token: Option<String>,
    /// Timeout for a single request.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                     |
    /// |---------------------------|-----------------------------|
    /// | `X1_API_URL`              | `http://localhost:8190/api` |
    /// | `X1_API_TOKEN`            | unset                       |
    /// | `X1_REQUEST_TIMEOUT_SECS` | `30`                        |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("X1_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let api_token = lookup("X1_API_TOKEN").filter(|token| !token.trim().is_empty());

        let request_timeout_secs = match lookup("X1_REQUEST_TIMEOUT_SECS") {
            Some(value) => value.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                var: "X1_REQUEST_TIMEOUT_SECS",
                value,
            })?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self {
            api_url,
            api_token,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }
}
