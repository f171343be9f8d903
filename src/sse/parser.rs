//! SSE line classification and delta payload decoding

use crate::sse::events::{DeltaEvent, DeltaParseError, SseLine, DATA_PREFIX};
use crate::sse::payloads::CompletionChunkPayload;

/// Classify a single SSE line (without its line terminator).
///
/// Only the literal `data: ` prefix yields [`SseLine::Data`]; `data:` without
/// the space and every other field name land in [`SseLine::Other`].
pub fn parse_sse_line(line: &str) -> SseLine {
    if line.is_empty() {
        return SseLine::Empty;
    }

    if let Some(stripped) = line.strip_prefix(':') {
        return SseLine::Comment(stripped.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix(DATA_PREFIX) {
        return SseLine::Data(rest.trim().to_string());
    }

    SseLine::Other(line.to_string())
}

/// Decode a data payload as a chat-completion chunk.
///
/// End-of-input failures are reported as [`DeltaParseError::Incomplete`] so
/// the caller can wait for the rest of a split event; everything else is
/// [`DeltaParseError::Malformed`].
pub fn parse_delta(payload: &str) -> Result<DeltaEvent, DeltaParseError> {
    let chunk: CompletionChunkPayload = serde_json::from_str(payload).map_err(|e| {
        if e.is_eof() {
            DeltaParseError::Incomplete(e.to_string())
        } else {
            DeltaParseError::Malformed(e.to_string())
        }
    })?;

    let delta = chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta)
        .unwrap_or_default();

    Ok(DeltaEvent {
        content: delta.content,
        role: delta.role,
    })
}
