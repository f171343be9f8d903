//! Chat endpoint configuration.
//!
//! Resolved once at application start and shared read-only afterwards.

use std::time::Duration;

use crate::error::ConfigError;

/// Environment variable holding the chat-completions endpoint URL.
pub const ENV_CHAT_URL: &str = "ITINERARI_CHAT_URL";
/// Environment variable holding the bearer token.
pub const ENV_AUTH_TOKEN: &str = "ITINERARI_AUTH_TOKEN";
/// Optional per-read timeout in seconds.
pub const ENV_READ_TIMEOUT_SECS: &str = "ITINERARI_READ_TIMEOUT_SECS";

/// Where and how to reach the chat endpoint.
///
/// # Example
///
/// ```ignore
/// use itinerari::config::ChatConfig;
///
/// let config = ChatConfig::new("https://gateway.example/functions/v1/chat", "token")
///     .with_read_timeout(Some(std::time::Duration::from_secs(60)));
/// ```
#[derive(Clone, PartialEq)]
pub struct ChatConfig {
    /// Full URL of the chat-completions endpoint
    pub endpoint_url: String,
    /// Sent as `Authorization: Bearer <token>`
    pub auth_token: String,
    /// Fail the reply if no chunk arrives within this long (default: none)
    pub read_timeout: Option<Duration>,
}

impl ChatConfig {
    pub fn new(endpoint_url: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            auth_token: auth_token.into(),
            read_timeout: None,
        }
    }

    /// Set the per-read timeout.
    pub fn with_read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Resolve from `ITINERARI_CHAT_URL`, `ITINERARI_AUTH_TOKEN` and
    /// the optional `ITINERARI_READ_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingVar { name })
        };

        let endpoint_url = required(ENV_CHAT_URL)?;
        if !endpoint_url.starts_with("http://") && !endpoint_url.starts_with("https://") {
            return Err(ConfigError::InvalidVar {
                name: ENV_CHAT_URL,
                value: endpoint_url,
                reason: "expected an http(s) URL",
            });
        }
        let auth_token = required(ENV_AUTH_TOKEN)?;

        let read_timeout = match lookup(ENV_READ_TIMEOUT_SECS).map(|v| v.trim().to_string()) {
            None => None,
            Some(v) if v.is_empty() => None,
            Some(v) => match v.parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    return Err(ConfigError::InvalidVar {
                        name: ENV_READ_TIMEOUT_SECS,
                        value: v,
                        reason: "expected a positive integer",
                    })
                }
            },
        };

        Ok(Self {
            endpoint_url,
            auth_token,
            read_timeout,
        })
    }
}

// Keep the token out of logs and panic messages
impl std::fmt::Debug for ChatConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatConfig")
            .field("endpoint_url", &self.endpoint_url)
            .field("auth_token", &"<redacted>")
            .field("read_timeout", &self.read_timeout)
            .finish()
    }
}
