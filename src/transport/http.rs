//! HTTP transport implementation.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, ClientBuilder};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use tracing::instrument;

use super::TransportError;
use crate::options::{MultipartContents, MultipartField, RequestBody};

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET request.
    Get,
    /// POST request.
    Post,
    /// PUT request.
    Put,
    /// DELETE request.
    Delete,
    /// PATCH request.
    Patch,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Patch => reqwest::Method::PATCH,
        }
    }
}

/// HTTP request representation.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute path relative to the base URI.
    pub path: String,
    /// Query parameters.
    pub query: Vec<(String, String)>,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Request body.
    pub body: RequestBody,
}

impl HttpRequest {
    /// Creates a request without query, headers or body.
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HashMap::new(),
            body: RequestBody::Empty,
        }
    }

    /// Sets a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Returns a header value, matching the name case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// HTTP response representation.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Reason phrase of the status line.
    pub reason_phrase: String,
    /// Response headers by lowercase name. A repeated header keeps its last value.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Bytes,
}

/// HTTP transport trait.
///
/// Sends one request and returns the raw response. Implementations never
/// interpret the status code and never retry.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send an HTTP request.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// HTTP transport implementation using reqwest.
///
/// The base URI and timeout are fixed at construction.
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Creates a new HTTP transport.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .tcp_keepalive(Duration::from_secs(60))
            .build()
            .map_err(|e| TransportError::Connection {
                message: e.to_string(),
                code: None,
            })?;

        Ok(Self::with_client(client, base_url, timeout))
    }

    /// Creates a transport around an existing reqwest client.
    pub fn with_client(client: Client, base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// Returns the base URI.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the full URL for a path.
    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn map_error(&self, e: reqwest::Error) -> TransportError {
        let code = e.status().map(|s| s.as_u16());
        if e.is_timeout() {
            TransportError::Timeout {
                message: e.to_string(),
                timeout: self.timeout,
            }
        } else if e.is_connect() {
            TransportError::Connection {
                message: e.to_string(),
                code,
            }
        } else {
            TransportError::Request {
                message: e.to_string(),
                code,
            }
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = self.build_url(&request.path);

        let mut req_builder = self.client.request(request.method.into(), &url);

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        for (name, value) in &request.headers {
            req_builder = req_builder.header(name, value);
        }

        req_builder = match request.body {
            RequestBody::Empty => req_builder,
            RequestBody::Json(body) => req_builder.body(body),
            RequestBody::Multipart(fields) => req_builder.multipart(build_form(fields)?),
        };

        let response = req_builder.send().await.map_err(|e| self.map_error(e))?;

        let status = response.status();
        let headers = collect_headers(response.headers());
        let body = response.bytes().await.map_err(|e| self.map_error(e))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            reason_phrase: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }
}

impl fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Flattens response headers into a map keyed by lowercase name.
///
/// Values that are not valid UTF-8 are converted lossily. When a header
/// repeats, the last value wins.
fn collect_headers(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}

/// Builds a reqwest multipart form, preserving field order.
fn build_form(fields: Vec<MultipartField>) -> Result<reqwest::multipart::Form, TransportError> {
    let mut form = reqwest::multipart::Form::new();

    for field in fields {
        let mut part = match field.contents() {
            MultipartContents::Text(text) => reqwest::multipart::Part::text(text.clone()),
            MultipartContents::Bytes(data) => reqwest::multipart::Part::bytes(data.to_vec()),
        };

        if let Some(filename) = field.filename() {
            part = part.file_name(filename.to_string());
        }

        if let Some(content_type) = field.content_type() {
            part = part.mime_str(content_type).map_err(|e| TransportError::Request {
                message: e.to_string(),
                code: None,
            })?;
        }

        if !field.headers().is_empty() {
            let mut headers = HeaderMap::new();
            for (name, value) in field.headers() {
                let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                    TransportError::Request {
                        message: format!("Invalid multipart header name '{}': {}", name, e),
                        code: None,
                    }
                })?;
                let value = HeaderValue::from_str(value).map_err(|e| TransportError::Request {
                    message: format!("Invalid multipart header value: {}", e),
                    code: None,
                })?;
                headers.insert(name, value);
            }
            part = part.headers(headers);
        }

        form = form.part(field.name().to_string(), part);
    }

    Ok(form)
}
