//! SSE line and delta event types
//!
//! Contains the classified SSE line, the decoded chat-completion delta and
//! the error returned when a data payload cannot be decoded.

/// Literal prefix that marks a data line. The trailing space is part of it.
pub const DATA_PREFIX: &str = "data: ";

/// Out-of-band end-of-stream marker sent as a data payload.
pub const DONE_SENTINEL: &str = "[DONE]";

/// Represents a classified SSE line
#[derive(Debug, Clone, PartialEq)]
pub enum SseLine {
    /// Blank line (event boundary)
    Empty,
    /// Comment line (starts with ':'), e.g. keep-alives
    Comment(String),
    /// Trimmed payload of a `data: ` line
    Data(String),
    /// Any other line (`event:`, `id:`, `data:` without the space, bare text)
    Other(String),
}

/// One decoded chat-completion chunk, reduced to what the reader consumes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeltaEvent {
    /// `choices[0].delta.content`, if the chunk carried one
    pub content: Option<String>,
    /// `choices[0].delta.role`, sent on the first chunk by most providers
    pub role: Option<String>,
}

impl DeltaEvent {
    /// The content fragment to append, ignoring empty strings.
    pub fn fragment(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.is_empty())
    }
}

/// Why a data payload could not be turned into a [`DeltaEvent`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DeltaParseError {
    /// The JSON ended early; more bytes may complete it.
    #[error("incomplete JSON payload: {0}")]
    Incomplete(String),
    /// The payload is not a chat-completion chunk and never will be.
    #[error("malformed JSON payload: {0}")]
    Malformed(String),
}

impl DeltaParseError {
    /// Whether waiting for more input could still resolve this payload.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, DeltaParseError::Incomplete(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_skips_empty_content() {
        let event = DeltaEvent {
            content: Some(String::new()),
            role: None,
        };
        assert_eq!(event.fragment(), None);

        let event = DeltaEvent {
            content: Some("Roma".to_string()),
            role: None,
        };
        assert_eq!(event.fragment(), Some("Roma"));

        assert_eq!(DeltaEvent::default().fragment(), None);
    }

    #[test]
    fn test_parse_error_is_incomplete() {
        assert!(DeltaParseError::Incomplete("eof".to_string()).is_incomplete());
        assert!(!DeltaParseError::Malformed("bad".to_string()).is_incomplete());
    }

    #[test]
    fn test_parse_error_display() {
        assert_eq!(
            DeltaParseError::Malformed("expected value".to_string()).to_string(),
            "malformed JSON payload: expected value"
        );
    }
}
