//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use bytes::Bytes;
use itinerari::adapters::{MockHttpClient, MockResponse};
use itinerari::chat::{ChatClient, ChatSession};
use itinerari::config::ChatConfig;

pub const TEST_URL: &str = "https://gateway.example/functions/v1/travel-chat";
pub const TEST_TOKEN: &str = "test-anon-key";

/// The end-of-stream event.
pub const DONE: &str = "data: [DONE]\n\n";

/// A complete `data:` event carrying one content fragment.
pub fn delta(content: &str) -> String {
    format!(
        "data: {}\n\n",
        serde_json::json!({
            "id": "chatcmpl-1",
            "object": "chat.completion.chunk",
            "choices": [{"index": 0, "delta": {"content": content}, "finish_reason": null}]
        })
    )
}

/// The role-only event most providers send first.
pub fn role_delta() -> String {
    format!(
        "data: {}\n\n",
        serde_json::json!({"choices": [{"index": 0, "delta": {"role": "assistant"}}]})
    )
}

/// Cut `body` into chunks at the given byte offsets (not necessarily char boundaries).
pub fn split_at(body: &str, cuts: &[usize]) -> Vec<Bytes> {
    let bytes = body.as_bytes();
    let mut chunks = Vec::new();
    let mut start = 0;
    for &cut in cuts {
        chunks.push(Bytes::copy_from_slice(&bytes[start..cut]));
        start = cut;
    }
    chunks.push(Bytes::copy_from_slice(&bytes[start..]));
    chunks
}

/// A session whose transport answers every request with `response`.
pub fn mock_session(response: MockResponse) -> (ChatSession, MockHttpClient) {
    let mock = MockHttpClient::new();
    mock.set_default_response(response);
    let client = ChatClient::with_http_client(
        ChatConfig::new(TEST_URL, TEST_TOKEN),
        Arc::new(mock.clone()),
    );
    (ChatSession::new(client), mock)
}
