//! Error handling for the assistant client.
//!
//! - **Domain errors**: configuration, upstream (non-2xx) and stream errors
//! - **Unified error**: [`ChatError`] consolidates them for the caller
//! - **Result alias**: [`ChatResult<T>`]
//!
//! | Error | Raised | Surfaced as |
//! |-------|--------|-------------|
//! | [`ConfigError`] | resolving `ChatConfig` | setup message |
//! | [`UpstreamError`] | non-2xx before streaming | the body's `error` field or a localized message |
//! | [`StreamError`] | transport failure or timeout mid-reply | localized message |
//!
//! Payloads that fail to decode mid-stream are recovered by the reader and
//! never become errors.

mod chat_error;
mod config;
mod stream;
mod upstream;

pub use chat_error::ChatError;
pub use config::ConfigError;
pub use stream::StreamError;
pub use upstream::{UpstreamError, UpstreamErrorKind, GENERIC_ERROR_MESSAGE};

/// Type alias for Results using ChatError.
pub type ChatResult<T> = Result<T, ChatError>;
