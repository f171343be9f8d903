//! Scripted [`HttpClient`] that replays reply bodies without a network.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{ByteStream, Headers, HttpClient, HttpError};

/// One call made through the mock.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub headers: Headers,
    pub body: Option<String>,
}

/// How the mock answers a request.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// 200 with the given body chunks, delivered in order
    Stream(Vec<Bytes>),
    /// The given chunks, then a transport error mid-body
    StreamThenError { chunks: Vec<Bytes>, error: HttpError },
    /// The given chunks, then a body that never produces anything again
    StreamThenStall(Vec<Bytes>),
    /// A non-2xx status with a raw body
    Status { status: u16, body: String },
    /// Fail before any response (connection refused, DNS, ...)
    Error(HttpError),
}

impl MockResponse {
    /// A 200 reply whose body arrives as these chunks, in order.
    pub fn chunks<I, S>(chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MockResponse::Stream(
            chunks
                .into_iter()
                .map(|c| Bytes::from(c.into()))
                .collect(),
        )
    }
}

/// Clones share their scripted responses and recorded requests, so a test
/// can keep a handle after giving one to a `ChatClient`.
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    default_response: Arc<Mutex<Option<MockResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests to exactly this URL with `response`.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(url.to_string(), response);
    }

    /// Answer every URL without its own response.
    pub fn set_default_response(&self, response: MockResponse) {
        let mut default = self.default_response.lock().unwrap();
        *default = Some(response);
    }

    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    fn record_request(&self, method: &str, url: &str, headers: &Headers, body: Option<String>) {
        let mut requests = self.requests.lock().unwrap();
        requests.push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body,
        });
    }

    fn get_response(&self, url: &str) -> Option<MockResponse> {
        let responses = self.responses.lock().unwrap();
        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }

        let default = self.default_response.lock().unwrap();
        default.clone()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError> {
        self.record_request("POST", url, headers, Some(body.to_string()));

        match self.get_response(url) {
            Some(MockResponse::Stream(chunks)) => Ok(Box::pin(stream::iter(
                chunks.into_iter().map(Ok::<Bytes, HttpError>),
            ))),
            Some(MockResponse::StreamThenError { chunks, error }) => {
                let body = stream::iter(chunks.into_iter().map(Ok::<Bytes, HttpError>))
                    .chain(stream::once(async move { Err(error) }));
                Ok(Box::pin(body))
            }
            Some(MockResponse::StreamThenStall(chunks)) => {
                let body = stream::iter(chunks.into_iter().map(Ok::<Bytes, HttpError>))
                    .chain(stream::pending());
                Ok(Box::pin(body))
            }
            Some(MockResponse::Status { status, body }) => {
                Err(HttpError::ServerError { status, body })
            }
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}
