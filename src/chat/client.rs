//! HTTP client for the chat-completions endpoint.

use std::sync::Arc;

use tracing::Instrument;

use crate::adapters::ReqwestHttpClient;
use crate::chat::reader::StreamingChatReader;
use crate::config::ChatConfig;
use crate::error::{ChatError, ChatResult};
use crate::models::{ChatMessage, ChatRequest};
use crate::traits::{ByteStream, Headers, HttpClient};

/// Client for the chat endpoint.
///
/// Opens one streamed reply per call. Transport is pluggable through
/// [`HttpClient`] so tests can replay canned bodies.
#[derive(Clone)]
pub struct ChatClient {
    config: Arc<ChatConfig>,
    http: Arc<dyn HttpClient>,
}

impl ChatClient {
    /// Create a client backed by reqwest.
    pub fn new(config: ChatConfig) -> Self {
        Self::with_http_client(config, Arc::new(ReqwestHttpClient::new()))
    }

    /// Create a client with a custom transport.
    pub fn with_http_client(config: ChatConfig, http: Arc<dyn HttpClient>) -> Self {
        Self {
            config: Arc::new(config),
            http,
        }
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    fn headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "text/event-stream".to_string());
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.config.auth_token),
        );
        headers
    }

    /// POST `{"messages": [...]}` and return a reader over the reply.
    ///
    /// Non-2xx answers fail here with [`ChatError::Upstream`] before any
    /// streaming starts.
    pub async fn open_reply(
        &self,
        messages: &[ChatMessage],
    ) -> ChatResult<StreamingChatReader<ByteStream>> {
        let body = serde_json::to_string(&ChatRequest::new(messages))?;
        let url = &self.config.endpoint_url;
        let span = tracing::debug_span!("open_reply", %url, messages = messages.len());

        let stream = self
            .http
            .post_stream(url, &body, &self.headers())
            .instrument(span)
            .await
            .map_err(|err| {
                let err = ChatError::from(err);
                tracing::warn!(code = err.error_code(), error = %err, "Chat request rejected");
                err
            })?;

        tracing::debug!("Chat endpoint accepted the request");
        Ok(StreamingChatReader::new(stream).with_read_timeout(self.config.read_timeout))
    }
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MockHttpClient, MockResponse};
    use crate::error::UpstreamErrorKind;
    use crate::traits::HttpError;

    const URL: &str = "https://gateway.example/functions/v1/chat";

    fn client(mock: &MockHttpClient) -> ChatClient {
        ChatClient::with_http_client(ChatConfig::new(URL, "tok-123"), Arc::new(mock.clone()))
    }

    #[tokio::test]
    async fn test_open_reply_sends_headers_and_body() {
        let mock = MockHttpClient::new();
        mock.set_response(URL, MockResponse::chunks(["data: [DONE]\n"]));

        let messages = vec![ChatMessage::user("Weekend a Torino")];
        let mut reader = client(&mock).open_reply(&messages).await.unwrap();
        assert_eq!(reader.next_snapshot().await, None);

        let requests = mock.get_requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.method, "POST");
        assert_eq!(request.url, URL);
        assert_eq!(
            request.headers.get("Authorization"),
            Some(&"Bearer tok-123".to_string())
        );
        assert_eq!(
            request.headers.get("Accept"),
            Some(&"text/event-stream".to_string())
        );
        let body: serde_json::Value =
            serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"messages": [{"role": "user", "content": "Weekend a Torino"}]})
        );
    }

    #[tokio::test]
    async fn test_open_reply_rate_limited() {
        let mock = MockHttpClient::new();
        mock.set_response(
            URL,
            MockResponse::Status {
                status: 429,
                body: String::new(),
            },
        );

        let err = client(&mock)
            .open_reply(&[ChatMessage::user("x")])
            .await
            .err().unwrap();
        match err {
            ChatError::Upstream(upstream) => {
                assert_eq!(upstream.kind(), UpstreamErrorKind::RateLimited)
            }
            other => panic!("Expected Upstream, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_open_reply_connection_failure() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::Error(HttpError::ConnectionFailed(
            "refused".to_string(),
        )));

        let err = client(&mock)
            .open_reply(&[ChatMessage::user("x")])
            .await
            .err().unwrap();
        assert!(matches!(err, ChatError::Connection(_)));
    }

    #[test]
    fn test_debug_hides_token() {
        let mock = MockHttpClient::new();
        let debug = format!("{:?}", client(&mock));
        assert!(!debug.contains("tok-123"));
    }
}
