//! Configuration errors.

/// Errors raised while resolving [`crate::config::ChatConfig`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is unset or blank.
    #[error("missing environment variable {name}")]
    MissingVar { name: &'static str },

    /// An environment variable is set to something unusable.
    #[error("invalid value for {name}: {value:?} ({reason})")]
    InvalidVar {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl ConfigError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ConfigError::MissingVar { name } => {
                format!("Configurazione mancante: imposta la variabile {}.", name)
            }
            ConfigError::InvalidVar { name, .. } => {
                format!("Configurazione non valida per {}.", name)
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::MissingVar { .. } => "E_CONFIG_MISSING",
            ConfigError::InvalidVar { .. } => "E_CONFIG_INVALID",
        }
    }
}
