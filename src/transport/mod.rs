//! HTTP transport layer for the Chaster client.
//!
//! [`HttpTransport`] is the raw send seam; [`TransportClient`] wraps one with
//! the bearer-token auth provider and the fixed JSON content type, and turns
//! each completed exchange into a [`ResponseEnvelope`].

mod http;

pub use self::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::instrument;

use crate::auth::AuthProvider;
use crate::observability::{log_error, log_request, log_response};
use crate::options::TransportOptions;
use crate::response::ResponseEnvelope;

/// Transport error types.
///
/// Raised when the HTTP exchange itself could not complete. Never carries a
/// parsed response status.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    /// Connection error (DNS, refused connection, TLS handshake).
    #[error("Connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
        /// Status-like code reported by the cause, if any.
        code: Option<u16>,
    },

    /// Timeout error.
    #[error("Timeout after {timeout:?}: {message}")]
    Timeout {
        /// Error message.
        message: String,
        /// Configured timeout.
        timeout: Duration,
    },

    /// Request could not be built, sent or read.
    #[error("Request error: {message}")]
    Request {
        /// Error message.
        message: String,
        /// Status-like code reported by the cause, if any.
        code: Option<u16>,
    },
}

impl TransportError {
    /// Returns the status-like code reported by the cause, if any.
    pub fn code(&self) -> Option<u16> {
        match self {
            TransportError::Connection { code, .. } | TransportError::Request { code, .. } => *code,
            TransportError::Timeout { .. } => None,
        }
    }
}

/// Executes single requests against the API.
///
/// Every request gets `Authorization: Bearer <token>` and, unless it carries
/// multipart fields, `Content-Type: application/json`. Configured default
/// headers are applied first and cannot override either.
pub struct TransportClient {
    transport: Arc<dyn HttpTransport>,
    auth: Arc<dyn AuthProvider>,
    default_headers: Vec<(String, String)>,
}

impl TransportClient {
    /// Creates a new transport client.
    pub fn new(transport: Arc<dyn HttpTransport>, auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            transport,
            auth,
            default_headers: Vec::new(),
        }
    }

    /// Adds headers sent with every request.
    pub fn with_default_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.default_headers.extend(headers);
        self
    }

    /// Executes one request. Single attempt, no retries.
    #[instrument(skip(self, options), fields(method = %method, path = %path))]
    pub async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        options: TransportOptions,
    ) -> Result<ResponseEnvelope, TransportError> {
        let request = self.build_request(method, path, options);

        log_request(method.as_str(), path, request.query.len(), request.body.is_multipart());
        let started = Instant::now();

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                log_error(&e, "Transport failed");
                return Err(e);
            }
        };

        log_response(response.status, started.elapsed().as_millis() as u64, response.body.len());

        Ok(ResponseEnvelope::new(
            response.status,
            response.reason_phrase,
            response.headers,
            response.body,
        ))
    }

    fn build_request(&self, method: HttpMethod, path: &str, options: TransportOptions) -> HttpRequest {
        let mut headers = HashMap::new();
        for (name, value) in &self.default_headers {
            set_header(&mut headers, name, value.clone());
        }

        if !options.body.is_multipart() {
            set_header(&mut headers, "Content-Type", "application/json".to_string());
        } else {
            remove_header(&mut headers, "Content-Type");
        }

        let mut auth_headers = HashMap::new();
        self.auth.apply_auth(&mut auth_headers);
        for (name, value) in auth_headers {
            set_header(&mut headers, &name, value);
        }

        HttpRequest {
            method,
            path: path.to_string(),
            query: options.query,
            headers,
            body: options.body,
        }
    }
}

impl fmt::Debug for TransportClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportClient")
            .field("auth_scheme", &self.auth.scheme())
            .field("default_headers", &self.default_headers.len())
            .finish()
    }
}

fn remove_header(headers: &mut HashMap<String, String>, name: &str) {
    headers.retain(|key, _| !key.eq_ignore_ascii_case(name));
}

fn set_header(headers: &mut HashMap<String, String>, name: &str, value: String) {
    remove_header(headers, name);
    headers.insert(name.to_string(), value);
}
