//! Response envelope.
//!
//! [`ResponseEnvelope`] wraps exactly one completed HTTP exchange. The JSON
//! body is decoded on first access and the outcome, success or failure, is
//! cached for the lifetime of the envelope.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::errors::{ChasterError, ChasterResult};

/// Read access shared by every response representation.
pub trait Respondable {
    /// HTTP status code.
    fn status_code(&self) -> u16;

    /// Reason phrase of the status line.
    fn reason_phrase(&self) -> &str;

    /// Decoded JSON body.
    fn body_as_object(&self) -> ChasterResult<&Value>;
}

/// One completed HTTP exchange.
#[derive(Debug)]
pub struct ResponseEnvelope {
    status_code: u16,
    reason_phrase: String,
    headers: HashMap<String, String>,
    body: Bytes,
    decoded: OnceLock<Result<Value, String>>,
}

impl ResponseEnvelope {
    /// Creates an envelope from its parts.
    ///
    /// Header names are stored lowercase.
    pub fn new(
        status_code: u16,
        reason_phrase: impl Into<String>,
        headers: HashMap<String, String>,
        body: impl Into<Bytes>,
    ) -> Self {
        let headers = headers
            .into_iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value))
            .collect();
        Self {
            status_code,
            reason_phrase: reason_phrase.into(),
            headers,
            body: body.into(),
            decoded: OnceLock::new(),
        }
    }

    /// Creates an envelope using the canonical reason phrase of the status.
    pub fn from_parts(status_code: u16, headers: HashMap<String, String>, body: impl Into<Bytes>) -> Self {
        Self::new(status_code, canonical_reason(status_code), headers, body)
    }

    /// HTTP status code.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Reason phrase of the status line.
    pub fn reason_phrase(&self) -> &str {
        &self.reason_phrase
    }

    /// Returns true for a 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Response headers, keyed by lowercase name.
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Returns a header value, matching the name case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Raw response body.
    pub fn raw_body(&self) -> &[u8] {
        &self.body
    }

    /// Decoded JSON body.
    ///
    /// Decoding happens on the first call; later calls return the cached
    /// value, or the cached [`ChasterError::Decode`] if decoding failed.
    /// An empty body is a decode failure.
    pub fn body_as_object(&self) -> ChasterResult<&Value> {
        self.decoded
            .get_or_init(|| decode_body(&self.body))
            .as_ref()
            .map_err(|message| ChasterError::decode(message.clone()))
    }

    /// Decoded JSON body as a key/value mapping.
    ///
    /// Shares the decode and cache of [`Self::body_as_object`]; fails with
    /// [`ChasterError::Decode`] when the payload is not a JSON object.
    pub fn body_as_map(&self) -> ChasterResult<&Map<String, Value>> {
        match self.body_as_object()? {
            Value::Object(map) => Ok(map),
            other => Err(ChasterError::decode(format!(
                "Body is not a JSON object: found {}",
                json_kind(other)
            ))),
        }
    }

    /// Deserializes the cached JSON body into a typed value.
    pub fn body_as<T: DeserializeOwned>(&self) -> ChasterResult<T> {
        let value = self.body_as_object()?.clone();
        serde_json::from_value(value).map_err(ChasterError::from)
    }
}

impl Respondable for ResponseEnvelope {
    fn status_code(&self) -> u16 {
        self.status_code
    }

    fn reason_phrase(&self) -> &str {
        &self.reason_phrase
    }

    fn body_as_object(&self) -> ChasterResult<&Value> {
        ResponseEnvelope::body_as_object(self)
    }
}

/// Returns the canonical reason phrase for a status code, or `""`.
pub fn canonical_reason(status_code: u16) -> &'static str {
    http::StatusCode::from_u16(status_code)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or("")
}

fn decode_body(body: &[u8]) -> Result<Value, String> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err("Syntax error: empty body".to_string());
    }
    serde_json::from_slice(body).map_err(|e| e.to_string())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
