//! Unified error type for the assistant.
//!
//! `ChatError` is what a caller of [`crate::chat::ChatSession`] sees. Every
//! variant turns into exactly one user-visible notification.

use super::config::ConfigError;
use super::stream::StreamError;
use super::upstream::{UpstreamError, GENERIC_ERROR_MESSAGE};
use crate::traits::HttpError;

/// Unified error type for a chat turn.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// Configuration could not be resolved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The request never got an HTTP answer.
    #[error("request failed: {0}")]
    Connection(HttpError),

    /// The endpoint answered with a non-2xx status.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// The reply stream failed after it started.
    #[error(transparent)]
    Stream(#[from] StreamError),

    /// Nothing to send.
    #[error("empty prompt")]
    EmptyPrompt,

    /// The request body could not be encoded.
    #[error("failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<HttpError> for ChatError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::ServerError { status, body } => {
                ChatError::Upstream(UpstreamError::from_response(status, &body))
            }
            other => ChatError::Connection(other),
        }
    }
}

impl ChatError {
    /// Get a user-friendly (Italian) error message.
    pub fn user_message(&self) -> String {
        match self {
            ChatError::Config(err) => err.user_message(),
            ChatError::Connection(HttpError::Timeout(_)) => {
                "Il server non ha risposto in tempo. Riprova.".to_string()
            }
            ChatError::Connection(_) => {
                "Impossibile contattare l'assistente. Controlla la connessione e riprova."
                    .to_string()
            }
            ChatError::Upstream(err) => err.user_message(),
            ChatError::Stream(err) => err.user_message(),
            ChatError::EmptyPrompt => "Scrivi un messaggio prima di inviare.".to_string(),
            ChatError::Encode(_) => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ChatError::Config(err) => err.error_code(),
            ChatError::Connection(_) => "E_CONNECTION",
            ChatError::Upstream(err) => err.error_code(),
            ChatError::Stream(err) => err.error_code(),
            ChatError::EmptyPrompt => "E_EMPTY_PROMPT",
            ChatError::Encode(_) => "E_ENCODE",
        }
    }
}
