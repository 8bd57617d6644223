//! Per-call request options.
//!
//! [`RequestOptions`] accumulates the query string, JSON body and multipart
//! fields of a single request. It is converted into an owned
//! [`TransportOptions`] snapshot right before the request is sent.
//!
//! A request carries either a JSON body or multipart fields, never both:
//! [`RequestOptions::to_transport_options`] rejects options with both
//! buckets populated.

use bytes::Bytes;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

use crate::errors::{ChasterError, ChasterResult};

/// A query string value, rendered as a string on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    /// Text value.
    Text(String),
    /// Integer value.
    Integer(i64),
    /// Floating point value.
    Float(f64),
    /// Boolean value, rendered as `true` / `false`.
    Bool(bool),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Text(value) => f.write_str(value),
            QueryValue::Integer(value) => write!(f, "{}", value),
            QueryValue::Float(value) => write!(f, "{}", value),
            QueryValue::Bool(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Text(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Integer(value)
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        QueryValue::Integer(i64::from(value))
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        QueryValue::Integer(i64::from(value))
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        QueryValue::Float(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

/// Contents of a multipart field.
#[derive(Debug, Clone, PartialEq)]
pub enum MultipartContents {
    /// Plain text value.
    Text(String),
    /// Binary payload, typically file data.
    Bytes(Bytes),
}

impl MultipartContents {
    /// Returns the length of the contents in bytes.
    pub fn len(&self) -> usize {
        match self {
            MultipartContents::Text(text) => text.len(),
            MultipartContents::Bytes(bytes) => bytes.len(),
        }
    }

    /// Returns true if the contents are empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One field of a multipart form.
///
/// Immutable once built. The name is always non-empty and file fields always
/// carry a non-empty filename.
#[derive(Debug, Clone, PartialEq)]
pub struct MultipartField {
    name: String,
    contents: MultipartContents,
    filename: Option<String>,
    content_type: Option<String>,
    headers: Vec<(String, String)>,
}

impl MultipartField {
    /// Creates a text field.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> ChasterResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(ChasterError::mandatory("Multipart field name"));
        }
        Ok(Self {
            name,
            contents: MultipartContents::Text(value.into()),
            filename: None,
            content_type: None,
            headers: Vec::new(),
        })
    }

    /// Creates a file field.
    pub fn file(
        name: impl Into<String>,
        filename: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> ChasterResult<Self> {
        let name = name.into();
        let filename = filename.into();
        if name.is_empty() {
            return Err(ChasterError::mandatory("Multipart field name"));
        }
        if filename.is_empty() {
            return Err(ChasterError::mandatory("File name"));
        }
        Ok(Self {
            name,
            contents: MultipartContents::Bytes(data.into()),
            filename: Some(filename),
            content_type: None,
            headers: Vec::new(),
        })
    }

    /// Sets the content type of the field.
    pub fn with_content_type(mut self, content_type: mime::Mime) -> Self {
        self.content_type = Some(content_type.to_string());
        self
    }

    /// Adds a header to the field.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Returns the field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the field contents.
    pub fn contents(&self) -> &MultipartContents {
        &self.contents
    }

    /// Returns the filename, present for file fields.
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Returns the content type, if set.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns the field headers.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Returns true if this field carries a file.
    pub fn is_file(&self) -> bool {
        self.filename.is_some()
    }
}

/// Body of an outgoing request.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// Serialized JSON object.
    Json(Bytes),
    /// Multipart form fields, in insertion order.
    Multipart(Vec<MultipartField>),
}

impl RequestBody {
    /// Returns true if the body is multipart.
    pub fn is_multipart(&self) -> bool {
        matches!(self, RequestBody::Multipart(_))
    }
}

/// Owned snapshot of [`RequestOptions`] consumed by the transport.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransportOptions {
    /// Query parameters with values rendered as strings.
    pub query: Vec<(String, String)>,
    /// Request body.
    pub body: RequestBody,
}

/// Accumulator for the query, JSON body and multipart fields of one request.
///
/// Performs no validation beyond the JSON / multipart exclusivity check at
/// conversion time; required arguments are checked by the resource wrappers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    query: BTreeMap<String, QueryValue>,
    json: Option<Map<String, Value>>,
    multipart: Vec<MultipartField>,
}

impl RequestOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options with the given JSON object as body.
    pub fn json(body: Map<String, Value>) -> Self {
        Self {
            json: Some(body),
            ..Self::default()
        }
    }

    /// Sets a query parameter. The last write for a key wins.
    pub fn set_query_value(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> &mut Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Sets a query parameter, consuming and returning the options.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.set_query_value(key, value);
        self
    }

    /// Returns a query parameter.
    pub fn query_value(&self, key: &str) -> Option<&QueryValue> {
        self.query.get(key)
    }

    /// Returns true if the query parameter is set.
    pub fn has_query_value(&self, key: &str) -> bool {
        self.query.contains_key(key)
    }

    /// Removes a query parameter.
    pub fn remove_query_value(&mut self, key: &str) -> Option<QueryValue> {
        self.query.remove(key)
    }

    /// Removes every query parameter.
    pub fn clear_query(&mut self) {
        self.query.clear();
    }

    /// Sets a JSON body value. The last write for a key wins.
    pub fn set_json_value(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.json
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Sets a JSON body value, consuming and returning the options.
    pub fn with_json_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_json_value(key, value);
        self
    }

    /// Replaces the JSON body with a serializable value.
    ///
    /// The value must serialize to a JSON object.
    pub fn set_json_body<T: Serialize + ?Sized>(&mut self, body: &T) -> ChasterResult<&mut Self> {
        match serde_json::to_value(body) {
            Ok(Value::Object(map)) => {
                self.json = Some(map);
                Ok(self)
            }
            Ok(_) => Err(ChasterError::invalid_argument(
                "Body",
                "Body must serialize to a JSON object",
            )),
            Err(e) => Err(ChasterError::invalid_argument(
                "Body",
                format!("Body could not be serialized: {}", e),
            )),
        }
    }

    /// Returns a JSON body value.
    pub fn json_value(&self, key: &str) -> Option<&Value> {
        self.json.as_ref().and_then(|json| json.get(key))
    }

    /// Returns true if the JSON body value is set.
    pub fn has_json_value(&self, key: &str) -> bool {
        self.json_value(key).is_some()
    }

    /// Removes a JSON body value.
    pub fn remove_json_value(&mut self, key: &str) -> Option<Value> {
        self.json.as_mut().and_then(|json| json.remove(key))
    }

    /// Removes the JSON body.
    pub fn clear_json(&mut self) {
        self.json = None;
    }

    /// Appends a multipart field.
    pub fn add_multipart_field(&mut self, field: MultipartField) -> &mut Self {
        self.multipart.push(field);
        self
    }

    /// Appends a multipart field, consuming and returning the options.
    pub fn with_multipart_field(mut self, field: MultipartField) -> Self {
        self.add_multipart_field(field);
        self
    }

    /// Returns the multipart fields in insertion order.
    pub fn multipart_fields(&self) -> &[MultipartField] {
        &self.multipart
    }

    /// Removes every multipart field.
    pub fn clear_multipart(&mut self) {
        self.multipart.clear();
    }

    /// Returns true if no query, body or multipart data is set.
    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.json.is_none() && self.multipart.is_empty()
    }

    /// Converts the options into an owned transport snapshot.
    ///
    /// Fails with [`ChasterError::InvalidArgument`] when both a JSON body and
    /// multipart fields are present.
    pub fn to_transport_options(&self) -> ChasterResult<TransportOptions> {
        let query = self
            .query
            .iter()
            .map(|(key, value)| (key.clone(), value.to_string()))
            .collect();

        let body = match (&self.json, self.multipart.is_empty()) {
            (Some(_), false) => {
                return Err(ChasterError::invalid_argument(
                    "options",
                    "JSON body and multipart fields are mutually exclusive",
                ));
            }
            (Some(json), true) => RequestBody::Json(encode_body(json)?),
            (None, false) => RequestBody::Multipart(self.multipart.clone()),
            (None, true) => RequestBody::Empty,
        };

        Ok(TransportOptions { query, body })
    }
}

/// Serializes a request body. Failures are argument errors, not decode errors.
fn encode_body<T: Serialize + ?Sized>(body: &T) -> ChasterResult<Bytes> {
    serde_json::to_vec(body)
        .map(Bytes::from)
        .map_err(|e| ChasterError::invalid_argument("Body", format!("Body could not be serialized: {}", e)))
}
