//! Request core shared by every resource wrapper.
//!
//! A [`RequestCore`] binds a [`TransportClient`] to one base route. Its verb
//! helpers return the [`ResponseEnvelope`] of the exchange directly, so a core
//! carries no per-call state and can be shared across tasks.

use serde_json::{Map, Value};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;

use crate::errors::{ChasterError, ChasterResult};
use crate::options::RequestOptions;
use crate::response::ResponseEnvelope;
use crate::routing::RouteContext;
use crate::transport::{HttpMethod, TransportClient};

/// Route-scoped request executor.
#[derive(Debug, Clone)]
pub struct RequestCore {
    transport: Arc<TransportClient>,
    base_route: String,
}

impl RequestCore {
    /// Creates a core for the given base route.
    pub fn new(transport: Arc<TransportClient>, base_route: impl Into<String>) -> Self {
        Self {
            transport,
            base_route: base_route.into(),
        }
    }

    /// Base route of this core.
    pub fn base_route(&self) -> &str {
        &self.base_route
    }

    /// Full path for a sub-route.
    pub fn route(&self, sub_path: &str) -> String {
        RouteContext::new(self.base_route.as_str(), sub_path).path()
    }

    /// Sends a GET request.
    pub async fn get(&self, sub_path: &str, options: RequestOptions) -> ChasterResult<ResponseEnvelope> {
        self.execute(HttpMethod::Get, sub_path, options).await
    }

    /// Sends a POST request.
    pub async fn post(&self, sub_path: &str, options: RequestOptions) -> ChasterResult<ResponseEnvelope> {
        self.execute(HttpMethod::Post, sub_path, options).await
    }

    /// Sends a PUT request.
    pub async fn put(&self, sub_path: &str, options: RequestOptions) -> ChasterResult<ResponseEnvelope> {
        self.execute(HttpMethod::Put, sub_path, options).await
    }

    /// Sends a DELETE request.
    pub async fn delete(&self, sub_path: &str, options: RequestOptions) -> ChasterResult<ResponseEnvelope> {
        self.execute(HttpMethod::Delete, sub_path, options).await
    }

    /// Sends a PATCH request.
    pub async fn patch(&self, sub_path: &str, options: RequestOptions) -> ChasterResult<ResponseEnvelope> {
        self.execute(HttpMethod::Patch, sub_path, options).await
    }

    #[instrument(skip(self, options), fields(base_route = %self.base_route))]
    async fn execute(
        &self,
        method: HttpMethod,
        sub_path: &str,
        options: RequestOptions,
    ) -> ChasterResult<ResponseEnvelope> {
        let transport_options = options.to_transport_options()?;
        let path = self.route(sub_path);

        self.transport
            .execute(method, &path, transport_options)
            .await
            .map_err(ChasterError::from)
    }
}

/// Checks that the envelope carries exactly the expected status.
///
/// Returns the envelope unchanged on a match. On a mismatch the envelope is
/// moved into [`ChasterError::UnexpectedStatus`] so the body stays
/// inspectable.
pub fn validate_status(envelope: ResponseEnvelope, expected: u16) -> ChasterResult<ResponseEnvelope> {
    let actual = envelope.status_code();
    if actual == expected {
        return Ok(envelope);
    }

    Err(ChasterError::UnexpectedStatus {
        expected,
        actual,
        reason_phrase: envelope.reason_phrase().to_string(),
        envelope: Box::new(envelope),
    })
}

/// Values that can be checked for emptiness by [`require_non_empty`].
pub trait Mandatory {
    /// Returns true when the value counts as absent.
    fn is_missing(&self) -> bool;
}

impl Mandatory for str {
    fn is_missing(&self) -> bool {
        self.is_empty()
    }
}

impl Mandatory for String {
    fn is_missing(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Mandatory> Mandatory for Option<T> {
    fn is_missing(&self) -> bool {
        self.as_ref().map_or(true, Mandatory::is_missing)
    }
}

impl<T> Mandatory for [T] {
    fn is_missing(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Mandatory for Vec<T> {
    fn is_missing(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V, S> Mandatory for HashMap<K, V, S> {
    fn is_missing(&self) -> bool {
        self.is_empty()
    }
}

impl Mandatory for Map<String, Value> {
    fn is_missing(&self) -> bool {
        self.is_empty()
    }
}

impl Mandatory for Value {
    fn is_missing(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Object(map) => map.is_empty(),
            Value::Bool(_) | Value::Number(_) => false,
        }
    }
}

impl<T: Mandatory + ?Sized> Mandatory for &T {
    fn is_missing(&self) -> bool {
        (**self).is_missing()
    }
}

/// Fails with [`ChasterError::InvalidArgument`] when `value` is empty.
///
/// Strings are not trimmed: `" "` is accepted.
pub fn require_non_empty<T: Mandatory + ?Sized>(value: &T, field: &str) -> ChasterResult<()> {
    if value.is_missing() {
        return Err(ChasterError::mandatory(field));
    }
    Ok(())
}

/// Validates an identifier and escapes it as one path segment.
///
/// The value must be non-empty and must not be `.` or `..`, which URL
/// parsing would resolve against the route. Everything outside the
/// unreserved set is percent-encoded, so `/`, `?` and `#` stay inside the
/// segment.
pub fn path_segment<'a>(value: &'a str, field: &str) -> ChasterResult<Cow<'a, str>> {
    require_non_empty(value, field)?;
    if value == "." || value == ".." {
        return Err(ChasterError::invalid_argument(
            field,
            format!("{} must not be a relative path segment", field),
        ));
    }
    Ok(urlencoding::encode(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::BearerTokenAuth;
    use crate::mocks::{MockResponse, MockTransport};
    use crate::options::MultipartField;
    use crate::transport::TransportError;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_case::test_case;

    fn core(transport: Arc<MockTransport>, base_route: &str) -> RequestCore {
        let client = TransportClient::new(transport, Arc::new(BearerTokenAuth::from_string("mock_token")));
        RequestCore::new(Arc::new(client), base_route)
    }

    #[tokio::test]
    async fn test_verbs_compose_routes() {
        let transport = Arc::new(MockTransport::new());
        transport.set_default(MockResponse::json(200, &json!({})));
        let core = core(transport.clone(), "locks/");

        core.get("", RequestOptions::new()).await.unwrap();
        core.post("/123/freeze/", RequestOptions::new()).await.unwrap();
        core.put("123", RequestOptions::new()).await.unwrap();
        core.delete("123//favorite", RequestOptions::new()).await.unwrap();
        core.patch("123", RequestOptions::new()).await.unwrap();

        let seen: Vec<(HttpMethod, String)> = transport
            .requests()
            .into_iter()
            .map(|request| (request.method, request.path))
            .collect();
        assert_eq!(
            seen,
            vec![
                (HttpMethod::Get, "/locks".to_string()),
                (HttpMethod::Post, "/locks/123/freeze".to_string()),
                (HttpMethod::Put, "/locks/123".to_string()),
                (HttpMethod::Delete, "/locks/123/favorite".to_string()),
                (HttpMethod::Patch, "/locks/123".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_conflicting_options_fail_before_io() {
        let transport = Arc::new(MockTransport::new());
        let core = core(transport.clone(), "files");

        let options = RequestOptions::new()
            .with_json_value("a", 1)
            .with_multipart_field(MultipartField::text("type", "messaging").unwrap());
        let error = core.post("upload", options).await.unwrap_err();

        assert!(error.is_invalid_argument());
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_transport_error_propagates_unchanged() {
        let transport = Arc::new(MockTransport::new());
        transport.queue_error(TransportError::Request {
            message: "Unauthorized mock".to_string(),
            code: Some(401),
        });

        let error = core(transport, "users").get("profile", RequestOptions::new()).await.unwrap_err();

        assert!(error.is_transport());
        assert_eq!(error.transport_code(), Some(401));
        assert!(error.to_string().contains("Unauthorized mock"));
    }

    #[test]
    fn test_validate_status_match_returns_envelope() {
        let envelope = ResponseEnvelope::from_parts(201, HashMap::new(), r#"{"body":"mock_value"}"#);
        let envelope = validate_status(envelope, 201).unwrap();
        assert_eq!(envelope.status_code(), 201);
    }

    #[test]
    fn test_validate_status_mismatch_message() {
        let envelope = ResponseEnvelope::from_parts(200, HashMap::new(), r#"{"ok":true}"#);
        let error = validate_status(envelope, 201).unwrap_err();

        assert_eq!(error.to_string(), "HTTP Code Expected: 201 Actual: 200 Reason: OK");
        assert_eq!(error.status_code(), Some(200));
        let envelope = error.envelope().unwrap();
        assert_eq!(envelope.body_as_object().unwrap(), &json!({"ok": true}));
    }

    #[test]
    fn test_validate_status_is_exact() {
        let envelope = ResponseEnvelope::from_parts(204, HashMap::new(), "");
        assert!(validate_status(envelope, 200).is_err());
    }

    #[test_case(&json!(null) ; "null")]
    #[test_case(&json!("") ; "empty string")]
    #[test_case(&json!([]) ; "empty array")]
    #[test_case(&json!({}) ; "empty object")]
    fn test_require_non_empty_rejects_empty_json(value: &Value) {
        let error = require_non_empty(value, "Body").unwrap_err();
        assert_eq!(error.to_string(), "Body is mandatory, can't be empty");
    }

    #[test]
    fn test_require_non_empty_values() {
        assert!(require_non_empty("", "Lock id").is_err());
        assert!(require_non_empty(" ", "Lock id").is_ok());
        assert!(require_non_empty(&String::from("abc"), "Lock id").is_ok());
        assert!(require_non_empty(&None::<String>, "Last id").is_err());
        assert!(require_non_empty(&Some(String::new()), "Last id").is_err());
        assert!(require_non_empty(&Vec::<u8>::new(), "Files").is_err());
        assert!(require_non_empty(&vec![1u8], "Files").is_ok());
        assert!(require_non_empty(&json!({"message": "hi"}), "Body").is_ok());
        assert!(require_non_empty(&json!(0), "Body").is_ok());
        assert!(require_non_empty(&Map::new(), "Body").is_err());
    }

    #[test]
    fn test_require_non_empty_reports_field() {
        match require_non_empty("", "Conversation id") {
            Err(ChasterError::InvalidArgument { field, message }) => {
                assert_eq!(field, "Conversation id");
                assert_eq!(message, "Conversation id is mandatory, can't be empty");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test_case("conv-1", "conv-1" ; "plain id")]
    #[test_case("a/b", "a%2Fb" ; "slash")]
    #[test_case("/", "%2F" ; "lone slash")]
    #[test_case("x?admin=1", "x%3Fadmin%3D1" ; "query")]
    #[test_case("a#b", "a%23b" ; "fragment")]
    #[test_case("...", "..." ; "three dots")]
    fn test_path_segment_escapes(value: &str, expected: &str) {
        assert_eq!(path_segment(value, "Lock ID").unwrap(), expected);
    }

    #[test_case("" ; "empty")]
    #[test_case("." ; "dot")]
    #[test_case(".." ; "dot dot")]
    fn test_path_segment_rejects(value: &str) {
        let error = path_segment(value, "Lock ID").unwrap_err();
        assert!(error.is_invalid_argument());
    }

    #[tokio::test]
    async fn test_escaped_segment_survives_route_composition() {
        let transport = Arc::new(MockTransport::new());
        transport.set_default(MockResponse::json(200, &json!({})));
        let core = core(transport.clone(), "conversations");

        let id = path_segment("conv-1/messages", "Conversation ID").unwrap();
        core.get(&id, RequestOptions::new()).await.unwrap();

        assert_eq!(transport.last_request().unwrap().path, "/conversations/conv-1%2Fmessages");
    }
}
