//! SSE (Server-Sent Events) stream parsing
//!
//! Parses the chat-completions token stream. The format consists of:
//! - `data: <json>` - one chat-completion chunk
//! - `data: [DONE]` - end of stream
//! - Lines starting with `:` - comments (keep-alives, ignored)
//! - Empty lines and any other field (`event:`, `id:`) - ignored
//!
//! # Module structure
//! - `events` - Line and delta types (SseLine, DeltaEvent, DeltaParseError)
//! - `payloads` - Internal payload deserialization structs
//! - `parser` - Line classification and payload decoding
//! - `buffer` - Line buffering across chunk boundaries
//! - `decoder` - Incremental UTF-8 decoding

mod buffer;
mod decoder;
mod events;
mod parser;
mod payloads;

// Re-export public types
pub use buffer::LineBuffer;
pub use decoder::Utf8StreamDecoder;
pub use events::{DeltaEvent, DeltaParseError, SseLine, DATA_PREFIX, DONE_SENTINEL};
pub use parser::{parse_delta, parse_sse_line};
