//! Locks and shared locks over the wire.

use chaster_client::types::{CreateSharedLock, LockListStatus};
use chaster_client::ChasterError;
use serde_json::json;
use wiremock::matchers::{body_json, query_param};
use wiremock::ResponseTemplate;

use super::*;

#[tokio::test]
async fn test_update_time_accepts_no_content() {
    let server = setup_mock_server().await;

    mock_with_auth("POST", "/locks/lock-1/update-time")
        .and(body_json(json!({"duration": 3600})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = client_for(&server)
        .locks()
        .update_time("lock-1", &json!({"duration": 3600}))
        .await
        .unwrap();

    assert_eq!(envelope.status_code(), 204);
    assert_eq!(envelope.reason_phrase(), "No Content");
    assert!(envelope.raw_body().is_empty());
    assert!(matches!(envelope.body_as_object(), Err(ChasterError::Decode { .. })));
}

#[tokio::test]
async fn test_list_locks_by_status() {
    let server = setup_mock_server().await;

    mock_with_auth("GET", "/locks")
        .and(query_param("status", "archived"))
        .respond_with(json_response(200, json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = client_for(&server)
        .locks()
        .list(LockListStatus::Archived)
        .await
        .unwrap();

    assert_eq!(envelope.body_as_object().unwrap(), &json!([]));
}

#[tokio::test]
async fn test_update_shared_lock_path() {
    let server = setup_mock_server().await;

    mock_with_auth("PUT", "/locks/shared-locks/sl-1")
        .and(body_json(json!({"name": "Renamed", "isPublic": true})))
        .respond_with(json_response(200, json!({"_id": "sl-1"})))
        .expect(1)
        .mount(&server)
        .await;

    let body = CreateSharedLock::new().name("Renamed").is_public(true);
    client_for(&server)
        .shared_locks()
        .update("sl-1", &body)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_remove_favorite() {
    let server = setup_mock_server().await;

    mock_with_auth("DELETE", "/shared-locks/sl-1/favorite")
        .respond_with(json_response(200, json!({})))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .shared_locks()
        .remove_favorite("sl-1")
        .await
        .unwrap();
}
