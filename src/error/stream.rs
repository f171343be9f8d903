//! Streaming-related error types.
//!
//! Errors that end an SSE reply after it has started. Payloads that fail to
//! decode are not errors at this level: the reader recovers from them.

use std::fmt;

/// Stream-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamError {
    /// Reading the next chunk from the transport failed.
    Transport {
        message: String,
    },

    /// No chunk arrived within the configured read timeout.
    Timeout {
        duration_secs: u64,
    },
}

impl StreamError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            StreamError::Transport { .. } => {
                "La connessione con l'assistente si è interrotta. Riprova.".to_string()
            }
            StreamError::Timeout { duration_secs } => format!(
                "L'assistente non ha risposto per {} secondi. Riprova.",
                duration_secs
            ),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::Transport { .. } => "E_STREAM_TRANSPORT",
            StreamError::Timeout { .. } => "E_STREAM_TIMEOUT",
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::Transport { message } => {
                write!(f, "Stream transport error: {}", message)
            }
            StreamError::Timeout { duration_secs } => {
                write!(f, "Stream timeout after {} seconds", duration_secs)
            }
        }
    }
}

impl std::error::Error for StreamError {}

impl From<crate::traits::HttpError> for StreamError {
    fn from(err: crate::traits::HttpError) -> Self {
        StreamError::Transport {
            message: err.to_string(),
        }
    }
}
