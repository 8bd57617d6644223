//! Conversations over the wire.

use chaster_client::types::{ConversationStatus, ConversationsQuery};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, query_param, query_param_is_missing};

use super::*;

#[tokio::test]
async fn test_send_message_sends_json_with_headers() {
    let server = setup_mock_server().await;

    mock_with_auth("POST", "/conversations/conv-1")
        .and(header("Content-Type", "application/json"))
        .and(header("X-Client", "integration"))
        .and(body_json(json!({"message": "hi"})))
        .respond_with(json_response(201, json!({"body": "mock_value"})))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = client_for(&server)
        .conversations()
        .send("conv-1", &json!({"message": "hi"}))
        .await
        .unwrap();

    assert_eq!(envelope.status_code(), 201);
    assert_eq!(envelope.reason_phrase(), "Created");
    assert_eq!(envelope.header("content-type"), Some("application/json"));
    assert_eq!(envelope.body_as_object().unwrap(), &json!({"body": "mock_value"}));
}

#[tokio::test]
async fn test_list_sends_query_parameters() {
    let server = setup_mock_server().await;

    mock_with_auth("GET", "/conversations")
        .and(query_param("limit", "25"))
        .and(query_param("status", "ignored"))
        .and(query_param_is_missing("offset"))
        .respond_with(json_response(200, json!([{"_id": "conv-1"}])))
        .expect(1)
        .mount(&server)
        .await;

    let query = ConversationsQuery::new().limit(25).status(ConversationStatus::Ignored);
    let envelope = client_for(&server).conversations().list(&query).await.unwrap();

    let conversations = envelope.body_as_object().unwrap().as_array().unwrap();
    assert_eq!(conversations.len(), 1);
}

#[tokio::test]
async fn test_messages_with_last_id() {
    let server = setup_mock_server().await;

    mock_with_auth("GET", "/conversations/conv-1/messages")
        .and(query_param("limit", "10"))
        .and(query_param("lastId", "m-1"))
        .respond_with(json_response(200, json!({"results": [], "hasMore": false})))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = client_for(&server)
        .conversations()
        .messages("conv-1", 10, Some("m-1"))
        .await
        .unwrap();

    assert_eq!(envelope.body_as_map().unwrap().get("hasMore"), Some(&json!(false)));
}

#[tokio::test]
async fn test_conversation_id_is_percent_encoded() {
    let server = setup_mock_server().await;

    mock_with_auth("GET", "/conversations/a%2Fb")
        .respond_with(json_response(200, json!({"_id": "a/b"})))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = client_for(&server).conversations().find("a/b").await.unwrap();

    assert_eq!(envelope.body_as_object().unwrap(), &json!({"_id": "a/b"}));
}
