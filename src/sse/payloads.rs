//! SSE payload deserialization structs
//!
//! Contains internal structs used to deserialize the JSON carried by
//! chat-completions `data: ` lines.

use serde::Deserialize;

/// One streamed chat-completion chunk.
/// Only `choices` matters; ids, model names and usage blocks are ignored.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CompletionChunkPayload {
    #[serde(default)]
    pub choices: Vec<ChoicePayload>,
}

/// A single entry of `choices`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChoicePayload {
    /// Role-only and finish chunks may omit the delta or send `null`
    #[serde(default)]
    pub delta: Option<DeltaPayload>,
}

/// Nested delta payload
#[derive(Debug, Clone, Deserialize, Default)]
pub(crate) struct DeltaPayload {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}
