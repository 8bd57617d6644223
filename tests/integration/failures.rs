//! Unexpected statuses and transport failures.

use std::time::Duration;

use chaster_client::{ChasterClient, ChasterError};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use super::*;

#[tokio::test]
async fn test_unexpected_status_carries_body() {
    let server = setup_mock_server().await;

    mock_with_auth("GET", "/users/profile/by-id/missing")
        .respond_with(json_response(404, json!({"message": "User not found"})))
        .expect(1)
        .mount(&server)
        .await;

    let error = client_for(&server)
        .users()
        .profile_by_id("missing")
        .await
        .unwrap_err();

    assert_eq!(
        error.to_string(),
        "HTTP Code Expected: 200 Actual: 404 Reason: Not Found"
    );
    assert_eq!(error.status_code(), Some(404));
    let body = error.envelope().unwrap().body_as_map().unwrap();
    assert_eq!(body.get("message"), Some(&json!("User not found")));
}

#[tokio::test]
async fn test_ping_hits_api_root() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).ping().await.unwrap();
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let client = ChasterClient::builder()
        .token(TOKEN)
        .base_url(format!("http://127.0.0.1:{}", port))
        .build()
        .unwrap();

    let error = client.conversations().find("conv-1").await.unwrap_err();

    assert!(error.is_transport());
    assert_eq!(error.status_code(), None);
    assert!(error.envelope().is_none());
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/community-event/categories"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let client = ChasterClient::builder()
        .token(TOKEN)
        .base_url(server.uri())
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let error = client.community_events().categories().await.unwrap_err();

    assert!(matches!(error, ChasterError::Transport { .. }));
    assert!(error.to_string().contains("Timeout"));
}

#[test]
fn test_plain_http_to_remote_host_is_rejected() {
    let result = ChasterClient::builder()
        .token(TOKEN)
        .base_url("http://api.chaster.app")
        .build();

    assert!(matches!(result, Err(ChasterError::Configuration { .. })));
}
