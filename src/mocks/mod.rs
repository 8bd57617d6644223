//! Mock implementations for testing.
//!
//! [`MockTransport`] records every request it receives and replays queued
//! responses or transport errors in order, so wrappers can be exercised
//! without network access.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::response::canonical_reason;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};

/// A mock response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// HTTP status code.
    pub status: u16,
    /// Reason phrase; the canonical phrase when not overridden.
    pub reason_phrase: String,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Bytes,
}

impl MockResponse {
    /// Creates a response with a raw body.
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            reason_phrase: canonical_reason(status).to_string(),
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    /// Creates a JSON response.
    pub fn json<T: serde::Serialize>(status: u16, value: &T) -> Self {
        let body = serde_json::to_vec(value).unwrap_or_default();
        Self::new(status, body).with_header("content-type", "application/json")
    }

    /// Creates a response without a body.
    pub fn empty(status: u16) -> Self {
        Self::new(status, Bytes::new())
    }

    /// Adds a header.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    /// Overrides the reason phrase.
    pub fn with_reason(mut self, reason_phrase: &str) -> Self {
        self.reason_phrase = reason_phrase.to_string();
        self
    }

    fn into_http_response(self) -> HttpResponse {
        HttpResponse {
            status: self.status,
            reason_phrase: self.reason_phrase,
            headers: self.headers,
            body: self.body,
        }
    }
}

type MockOutcome = Result<MockResponse, TransportError>;

/// Mock HTTP transport for testing.
#[derive(Debug, Default)]
pub struct MockTransport {
    outcomes: Mutex<VecDeque<MockOutcome>>,
    requests: Mutex<Vec<HttpRequest>>,
    default_response: Mutex<Option<MockResponse>>,
}

impl MockTransport {
    /// Creates a new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response.
    pub fn queue(&self, response: MockResponse) {
        lock(&self.outcomes).push_back(Ok(response));
    }

    /// Queues a transport failure.
    pub fn queue_error(&self, error: TransportError) {
        lock(&self.outcomes).push_back(Err(error));
    }

    /// Sets the response returned once the queue is empty.
    pub fn set_default(&self, response: MockResponse) {
        *lock(&self.default_response) = Some(response);
    }

    /// Returns all recorded requests.
    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }

    /// Returns the last recorded request.
    pub fn last_request(&self) -> Option<HttpRequest> {
        lock(&self.requests).last().cloned()
    }

    /// Returns the number of recorded requests.
    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Clears recorded requests.
    pub fn clear_requests(&self) {
        lock(&self.requests).clear();
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        lock(&self.requests).push(request);

        let next = lock(&self.outcomes).pop_front();
        match next {
            Some(outcome) => outcome.map(MockResponse::into_http_response),
            None => match lock(&self.default_response).clone() {
                Some(response) => Ok(response.into_http_response()),
                None => Err(TransportError::Request {
                    message: "No mock response queued".to_string(),
                    code: None,
                }),
            },
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::HttpMethod;

    #[tokio::test]
    async fn test_replays_in_order_and_records() {
        let transport = MockTransport::new();
        transport.queue(MockResponse::json(200, &serde_json::json!({"n": 1})));
        transport.queue_error(TransportError::Request {
            message: "boom".to_string(),
            code: Some(500),
        });

        let first = transport.send(HttpRequest::new(HttpMethod::Get, "/a")).await.unwrap();
        assert_eq!(first.status, 200);
        assert_eq!(first.reason_phrase, "OK");

        let second = transport.send(HttpRequest::new(HttpMethod::Post, "/b")).await;
        assert_eq!(second.unwrap_err().code(), Some(500));

        assert_eq!(transport.request_count(), 2);
        assert_eq!(transport.last_request().unwrap().path, "/b");
    }

    #[tokio::test]
    async fn test_default_response_and_exhaustion() {
        let transport = MockTransport::new();
        assert!(transport.send(HttpRequest::new(HttpMethod::Get, "/")).await.is_err());

        transport.set_default(MockResponse::empty(204).with_reason("Nothing"));
        let response = transport.send(HttpRequest::new(HttpMethod::Get, "/")).await.unwrap();
        assert_eq!(response.status, 204);
        assert_eq!(response.reason_phrase, "Nothing");
        assert!(response.body.is_empty());

        transport.clear_requests();
        assert_eq!(transport.request_count(), 0);
    }
}
