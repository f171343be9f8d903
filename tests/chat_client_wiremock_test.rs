//! End-to-end chat requests over real HTTP using wiremock.
//!
//! These tests verify that the reqwest-backed ChatClient sends the expected
//! request and that statuses and SSE bodies surface correctly.

mod common;

use itinerari::chat::{ChatClient, ChatSession, Termination};
use itinerari::config::ChatConfig;
use itinerari::error::{ChatError, UpstreamErrorKind, GENERIC_ERROR_MESSAGE};
use itinerari::models::ChatMessage;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{delta, role_delta, DONE, TEST_TOKEN};

const CHAT_PATH: &str = "/functions/v1/travel-chat";

/// Helper to create a session pointing at the mock server.
fn session_for(server: &MockServer) -> ChatSession {
    let config = ChatConfig::new(format!("{}{}", server.uri(), CHAT_PATH), TEST_TOKEN);
    ChatSession::new(ChatClient::new(config))
}

/// Helper to mount an error status on the chat path.
async fn mount_status(server: &MockServer, status: u16, body: &str) {
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_streamed_reply_over_http() {
    let server = MockServer::start().await;
    let body = format!(
        "{}: keep-alive\n\n{}{}{}",
        role_delta(),
        delta("Giorno 1: Uffizi"),
        delta(", Giorno 2: Boboli"),
        DONE
    );

    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .and(header("Authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
        .and(header("Content-Type", "application/json"))
        .and(body_json(serde_json::json!({
            "messages": [{"role": "user", "content": "Due giorni a Firenze"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    let mut seen = Vec::new();
    let outcome = session
        .send("Due giorni a Firenze", |text| seen.push(text.to_string()))
        .await
        .unwrap();

    assert_eq!(
        seen,
        vec!["Giorno 1: Uffizi", "Giorno 1: Uffizi, Giorno 2: Boboli"]
    );
    assert_eq!(outcome.termination, Termination::Sentinel);
    assert_eq!(
        session.conversation().last(),
        Some(&ChatMessage::assistant("Giorno 1: Uffizi, Giorno 2: Boboli"))
    );
}

#[tokio::test]
async fn test_rate_limited_status() {
    let server = MockServer::start().await;
    mount_status(&server, 429, "").await;

    let mut session = session_for(&server);
    let err = session.send("Ciao", |_| {}).await.unwrap_err();

    match &err {
        ChatError::Upstream(upstream) => {
            assert_eq!(upstream.kind(), UpstreamErrorKind::RateLimited)
        }
        other => panic!("Expected Upstream, got {:?}", other),
    }
    assert!(err.user_message().contains("Troppe richieste"));
    // Only the user message remains
    assert_eq!(session.conversation().messages(), &[ChatMessage::user("Ciao")]);
}

#[tokio::test]
async fn test_quota_exceeded_status() {
    let server = MockServer::start().await;
    mount_status(&server, 402, "{}").await;

    let err = session_for(&server).send("Ciao", |_| {}).await.unwrap_err();

    assert_eq!(err.error_code(), "E_UPSTREAM_QUOTA");
    assert!(err.user_message().contains("Crediti esauriti"));
}

#[tokio::test]
async fn test_error_field_takes_precedence() {
    let server = MockServer::start().await;
    mount_status(&server, 429, r#"{"error":"Limite giornaliero raggiunto"}"#).await;

    let err = session_for(&server).send("Ciao", |_| {}).await.unwrap_err();

    assert_eq!(err.user_message(), "Limite giornaliero raggiunto");
}

#[tokio::test]
async fn test_non_json_error_body_uses_generic_message() {
    let server = MockServer::start().await;
    mount_status(&server, 500, "<html>Internal Server Error</html>").await;

    let err = session_for(&server).send("Ciao", |_| {}).await.unwrap_err();

    assert_eq!(err.error_code(), "E_UPSTREAM_STATUS");
    assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_unreachable_endpoint() {
    // Nothing listens here once the server is dropped
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };
    let config = ChatConfig::new(format!("{}{}", uri, CHAT_PATH), TEST_TOKEN);
    let mut session = ChatSession::new(ChatClient::new(config));

    let err = session.send("Ciao", |_| {}).await.unwrap_err();

    assert!(matches!(err, ChatError::Connection(_)), "got {:?}", err);
    assert_eq!(session.conversation().messages(), &[ChatMessage::user("Ciao")]);
}
