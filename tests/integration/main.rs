//! Integration tests using WireMock.
//!
//! These tests drive the real reqwest transport against a local mock server
//! and check what goes over the wire: verbs, paths, query strings, headers,
//! JSON and multipart bodies, and how responses and failures come back.

mod conversations;
mod failures;
mod files;
mod locks;

use chaster_client::ChasterClient;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockBuilder, MockServer, ResponseTemplate};

/// Token used by every integration test client.
pub const TOKEN: &str = "integration_token";

/// Starts a mock server.
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server.
pub fn client_for(server: &MockServer) -> ChasterClient {
    ChasterClient::builder()
        .token(TOKEN)
        .base_url(server.uri())
        .header("X-Client", "integration")
        .build()
        .unwrap_or_else(|e| panic!("client should build against a loopback server: {}", e))
}

/// Mock matching verb, path and bearer token.
pub fn mock_with_auth(method_matcher: &str, path_matcher: &str) -> MockBuilder {
    Mock::given(method(method_matcher))
        .and(path(path_matcher))
        .and(header("Authorization", format!("Bearer {}", TOKEN).as_str()))
}

/// JSON response template.
pub fn json_response(status: u16, body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(body)
}
