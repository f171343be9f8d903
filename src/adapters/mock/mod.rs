//! Mock implementations for testing.
//!
//! Enables testing the chat client and reader without network access.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with configurable streamed responses

pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
