mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn test_register_success() {
    let server = common::create_test_server();

    let response = server
        .post("/api/user")
        .json(&json!({ "email": "Jane <jane@example.com>" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    let key = json["api_key"].as_str().unwrap();
    assert_eq!(key.len(), 128);
    assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let server = common::create_test_server();

    common::register(&server, "jane@example.com").await;

    // Same mailbox in display-name form canonicalizes to the same email.
    let response = server
        .post("/api/user")
        .json(&json!({ "email": "Jane Doe <jane@example.com>" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);

    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "already_exists");
}

#[tokio::test]
async fn test_register_invalid_emails() {
    let server = common::create_test_server();

    for body in [
        json!({ "email": "123" }),
        json!({ "email": 123 }),
        json!({ "email": "" }),
        json!({}),
    ] {
        let response = server.post("/api/user").json(&body).await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["error"]["code"], "invalid_email");
    }
}

#[tokio::test]
async fn test_distinct_users_get_distinct_keys() {
    let server = common::create_test_server();

    let first = common::register(&server, "a@example.com").await;
    let second = common::register(&server, "b@example.com").await;

    assert_ne!(first, second);
}

#[tokio::test]
async fn test_issued_key_authenticates() {
    let server = common::create_test_server();

    let key = common::register(&server, "jane@example.com").await;

    let response = server
        .get("/api/urls")
        .add_header(common::API_KEY_HEADER, key.as_str())
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!([]));
}
