//! One conversation with the assistant.
//!
//! `send` takes `&mut self`, so a second turn cannot start while a reply is
//! still streaming. Dropping the future of an in-flight `send` abandons the
//! reply; the next `send` cleans up whatever it left behind.

use tracing::Instrument;

use crate::chat::client::ChatClient;
use crate::chat::reader::ReplyOutcome;
use crate::error::{ChatError, ChatResult};
use crate::models::Conversation;

/// A conversation plus the client used to extend it.
#[derive(Debug)]
pub struct ChatSession {
    client: ChatClient,
    conversation: Conversation,
}

impl ChatSession {
    pub fn new(client: ChatClient) -> Self {
        Self::with_conversation(client, Conversation::new())
    }

    /// Continue an existing conversation.
    pub fn with_conversation(client: ChatClient, conversation: Conversation) -> Self {
        Self {
            client,
            conversation,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn client(&self) -> &ChatClient {
        &self.client
    }

    /// Drop all messages and start over.
    pub fn new_conversation(&mut self) {
        self.conversation.reset();
        tracing::info!(conversation = %self.conversation.id(), "Started new conversation");
    }

    /// Send `prompt` and stream the reply into the conversation.
    ///
    /// `on_update` receives the full reply text after every fragment. The user
    /// message stays in the conversation whatever the outcome; the assistant
    /// placeholder is removed if it never received content.
    pub async fn send<F>(&mut self, prompt: &str, on_update: F) -> ChatResult<ReplyOutcome>
    where
        F: FnMut(&str),
    {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(ChatError::EmptyPrompt);
        }

        // Left behind by a turn that was abandoned mid-stream
        if self.conversation.discard_empty_reply() {
            tracing::debug!("Removed empty reply from an interrupted turn");
        }

        self.conversation.push_user(prompt);
        let span = tracing::info_span!(
            "chat_turn",
            conversation = %self.conversation.id(),
            turn = self.conversation.len()
        );

        self.stream_reply(on_update).instrument(span).await
    }

    async fn stream_reply<F>(&mut self, on_update: F) -> ChatResult<ReplyOutcome>
    where
        F: FnMut(&str),
    {
        let reader = self.client.open_reply(self.conversation.messages()).await?;

        match reader.stream_into(&mut self.conversation, on_update).await {
            Ok(outcome) => {
                if outcome.is_empty() {
                    tracing::warn!("Reply closed without any content");
                    self.conversation.discard_empty_reply();
                }
                Ok(outcome)
            }
            Err(err) => {
                self.conversation.discard_empty_reply();
                Err(err.into())
            }
        }
    }
}
