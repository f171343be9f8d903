use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// One entry of the conversation, serialized as `{role, content}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }

    /// An assistant message with no content yet: a reply slot awaiting its stream.
    pub fn is_empty_reply(&self) -> bool {
        self.role == MessageRole::Assistant && self.content.is_empty()
    }
}

/// Ordered message list the assistant reply is appended to and updated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    /// Correlates log lines of one conversation
    id: Uuid,
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            messages: Vec::new(),
        }
    }

    /// Start from prior messages, e.g. a restored history.
    pub fn with_messages(messages: Vec<ChatMessage>) -> Self {
        Self {
            id: Uuid::new_v4(),
            messages,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::user(content));
    }

    /// Append the empty assistant placeholder and return its index.
    pub fn begin_assistant_reply(&mut self) -> usize {
        self.messages.push(ChatMessage::assistant(String::new()));
        self.messages.len() - 1
    }

    /// Replace the content of the reply at `index` with the latest snapshot.
    ///
    /// Returns false if `index` is not an assistant message.
    pub fn update_reply(&mut self, index: usize, text: &str) -> bool {
        match self.messages.get_mut(index) {
            Some(message) if message.role == MessageRole::Assistant => {
                message.content.clear();
                message.content.push_str(text);
                true
            }
            _ => false,
        }
    }

    /// Remove the trailing assistant message if it never received content.
    ///
    /// Returns true when a placeholder was removed.
    pub fn discard_empty_reply(&mut self) -> bool {
        if self.messages.last().is_some_and(ChatMessage::is_empty_reply) {
            self.messages.pop();
            true
        } else {
            false
        }
    }

    /// Forget all messages and start a fresh conversation id.
    pub fn reset(&mut self) {
        self.id = Uuid::new_v4();
        self.messages.clear();
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}
