use serde::Serialize;

use super::ChatMessage;

/// Body of the chat-completions POST: `{"messages": [...]}`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatRequest<'a> {
    pub messages: &'a [ChatMessage],
}

impl<'a> ChatRequest<'a> {
    pub fn new(messages: &'a [ChatMessage]) -> Self {
        Self { messages }
    }
}
