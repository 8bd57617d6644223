//! Multipart uploads over the wire.

use chaster_client::types::{StorageFileType, UploadFiles};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header_regex};

use super::*;

#[tokio::test]
async fn test_upload_sends_multipart_form() {
    let server = setup_mock_server().await;

    mock_with_auth("POST", "/files/upload")
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .and(body_string_contains("name=\"type\""))
        .and(body_string_contains("messaging"))
        .and(body_string_contains("name=\"files\"; filename=\"note.txt\""))
        .and(body_string_contains("hello upload"))
        .respond_with(json_response(201, json!({"token": "upload-token"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut files = UploadFiles::new();
    files.add_file("note.txt", "hello upload").unwrap();

    let envelope = client_for(&server)
        .files()
        .upload(&files, StorageFileType::Messaging)
        .await
        .unwrap();

    assert_eq!(
        envelope.body_as_map().unwrap().get("token"),
        Some(&json!("upload-token"))
    );
}

#[tokio::test]
async fn test_find_file_expects_created() {
    let server = setup_mock_server().await;

    mock_with_auth("GET", "/files/key-1")
        .respond_with(json_response(201, json!({"url": "https://cdn.example/key-1"})))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).files().find("key-1").await.unwrap();
}
