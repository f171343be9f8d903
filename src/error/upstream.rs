//! Errors returned by the chat endpoint before streaming begins.

use serde::Deserialize;
use std::fmt;

/// Generic fallback shown when the gateway gives no usable message.
pub const GENERIC_ERROR_MESSAGE: &str = "Si è verificato un errore. Riprova più tardi.";

const RATE_LIMITED_MESSAGE: &str = "Troppe richieste. Attendi qualche istante e riprova.";
const QUOTA_EXCEEDED_MESSAGE: &str =
    "Crediti esauriti. Ricarica il tuo account per continuare a usare l'assistente.";

/// How a non-2xx status is presented to the user.
/// Only affects messaging; nothing is retried automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamErrorKind {
    /// HTTP 429
    RateLimited,
    /// HTTP 402
    QuotaExceeded,
    /// Any other non-2xx status
    Status,
}

/// A non-2xx answer from the chat endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamError {
    /// HTTP status code
    pub status: u16,
    /// The `error` field of the JSON body, when there was one
    pub message: Option<String>,
}

/// Best-effort shape of an error body: `{"error": "..."}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<serde_json::Value>,
}

impl UpstreamError {
    /// Build from a status and the raw body, tolerating non-JSON bodies.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .and_then(|error| match error {
                serde_json::Value::String(s) => Some(s),
                serde_json::Value::Null => None,
                // Some gateways nest it: {"error": {"message": "..."}}
                other => other
                    .get("message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string),
            })
            .filter(|m| !m.trim().is_empty());

        Self { status, message }
    }

    pub fn kind(&self) -> UpstreamErrorKind {
        match self.status {
            429 => UpstreamErrorKind::RateLimited,
            402 => UpstreamErrorKind::QuotaExceeded,
            _ => UpstreamErrorKind::Status,
        }
    }

    /// The upstream `error` field wins; otherwise a localized message by kind.
    pub fn user_message(&self) -> String {
        if let Some(message) = &self.message {
            return message.clone();
        }
        match self.kind() {
            UpstreamErrorKind::RateLimited => RATE_LIMITED_MESSAGE.to_string(),
            UpstreamErrorKind::QuotaExceeded => QUOTA_EXCEEDED_MESSAGE.to_string(),
            UpstreamErrorKind::Status => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self.kind() {
            UpstreamErrorKind::RateLimited => "E_UPSTREAM_RATE_LIMIT",
            UpstreamErrorKind::QuotaExceeded => "E_UPSTREAM_QUOTA",
            UpstreamErrorKind::Status => "E_UPSTREAM_STATUS",
        }
    }
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "Chat endpoint returned {}: {}", self.status, message),
            None => write!(f, "Chat endpoint returned {}", self.status),
        }
    }
}

impl std::error::Error for UpstreamError {}
