//! Chat turns against the assistant endpoint.
//!
//! - [`ChatClient`] opens a streamed reply for a message list
//! - [`StreamingChatReader`] turns the SSE body into growing text snapshots
//! - [`ChatSession`] owns a [`Conversation`](crate::models::Conversation) and runs one turn at a time

pub mod client;
pub mod reader;
pub mod session;

pub use client::ChatClient;
pub use reader::{ReaderState, ReplyOutcome, StreamingChatReader, Termination};
pub use session::ChatSession;
