mod common;

use axum::http::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn test_short_requires_api_key() {
    let server = common::create_test_server();

    let response = server
        .get("/api/short")
        .add_query_param("long_url", "example.com")
        .await;

    response.assert_status_unauthorized();
    assert_eq!(response.header("www-authenticate"), "X-Api-Key");

    let response = server
        .get("/api/short")
        .add_header(common::API_KEY_HEADER, "not-a-key")
        .add_query_param("long_url", "example.com")
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_short_generates_code() {
    let server = common::create_test_server();
    let key = common::register(&server, "jane@example.com").await;

    let short_url = common::shorten(&server, &key, "www.google.com").await;

    let code = short_url.strip_prefix("http://sho.rt/").unwrap();
    assert_eq!(code.len(), 9);
    assert!(code.chars().all(|c| c.is_ascii_alphabetic()));
}

#[tokio::test]
async fn test_short_same_long_url_twice_is_conflict() {
    let server = common::create_test_server();
    let key = common::register(&server, "jane@example.com").await;

    common::shorten(&server, &key, "example.com").await;

    // Canonically equal input.
    let response = server
        .get("/api/short")
        .add_header(common::API_KEY_HEADER, key.as_str())
        .add_query_param("long_url", " http://example.com/ ")
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["error"]["code"], "already_exists");
}

#[tokio::test]
async fn test_short_same_long_url_for_different_owners() {
    let server = common::create_test_server();
    let jane = common::register(&server, "jane@example.com").await;
    let john = common::register(&server, "john@example.com").await;

    let first = common::shorten(&server, &jane, "example.com").await;
    let second = common::shorten(&server, &john, "example.com").await;

    assert_ne!(first, second);
}

#[tokio::test]
async fn test_short_with_explicit_code() {
    let server = common::create_test_server();
    let key = common::register(&server, "jane@example.com").await;

    let response = server
        .get("/api/short")
        .add_header(common::API_KEY_HEADER, key.as_str())
        .add_query_param("long_url", "example.com")
        .add_query_param("code", "mycode")
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["short_url"], "http://sho.rt/mycode");

    // An explicit code does not block the same long url with another code.
    let response = server
        .get("/api/short")
        .add_header(common::API_KEY_HEADER, key.as_str())
        .add_query_param("long_url", "example.com")
        .add_query_param("code", "other")
        .await;

    response.assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_short_explicit_code_is_global() {
    let server = common::create_test_server();
    let jane = common::register(&server, "jane@example.com").await;
    let john = common::register(&server, "john@example.com").await;

    let response = server
        .get("/api/short")
        .add_header(common::API_KEY_HEADER, jane.as_str())
        .add_query_param("long_url", "a.com")
        .add_query_param("code", "taken")
        .await;
    response.assert_status(StatusCode::CREATED);

    for key in [&jane, &john] {
        let response = server
            .get("/api/short")
            .add_header(common::API_KEY_HEADER, key.as_str())
            .add_query_param("long_url", "b.com")
            .add_query_param("code", "taken")
            .await;

        response.assert_status(StatusCode::CONFLICT);
    }
}

#[tokio::test]
async fn test_short_code_too_long() {
    let server = common::create_test_server();
    let key = common::register(&server, "jane@example.com").await;

    let response = server
        .get("/api/short")
        .add_header(common::API_KEY_HEADER, key.as_str())
        .add_query_param("long_url", "example.com")
        .add_query_param("code", "abcdefghij")
        .await;

    response.assert_status_bad_request();

    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "code_too_long");
    assert_eq!(json["error"]["message"], "Code param must have a max length of 9");
}

#[tokio::test]
async fn test_short_empty_code_generates_one() {
    let server = common::create_test_server();
    let key = common::register(&server, "jane@example.com").await;

    let response = server
        .get("/api/short")
        .add_header(common::API_KEY_HEADER, key.as_str())
        .add_query_param("long_url", "example.com")
        .add_query_param("code", "")
        .await;

    response.assert_status(StatusCode::CREATED);

    let short_url = response.json::<Value>()["short_url"]
        .as_str()
        .unwrap()
        .to_string();
    assert_eq!(common::code_of(&short_url).len(), 9);
}

#[tokio::test]
async fn test_short_invalid_or_missing_long_url() {
    let server = common::create_test_server();
    let key = common::register(&server, "jane@example.com").await;

    let response = server
        .get("/api/short")
        .add_header(common::API_KEY_HEADER, key.as_str())
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "invalid_url");

    let response = server
        .get("/api/short")
        .add_header(common::API_KEY_HEADER, key.as_str())
        .add_query_param("long_url", "http://")
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "invalid_url");
}

#[tokio::test]
async fn test_short_rejects_control_characters() {
    let server = common::create_test_server();
    let key = common::register(&server, "jane@example.com").await;

    let response = server
        .get("/api/short")
        .add_header(common::API_KEY_HEADER, key.as_str())
        .add_query_param("long_url", "http://example.com/a\u{1}b")
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "invalid_url");
}

#[tokio::test]
async fn test_short_generated_code_after_explicit_code() {
    let server = common::create_test_server();
    let key = common::register(&server, "jane@example.com").await;

    let response = server
        .get("/api/short")
        .add_header(common::API_KEY_HEADER, key.as_str())
        .add_query_param("long_url", "example.com")
        .add_query_param("code", "home")
        .await;
    response.assert_status(StatusCode::CREATED);

    // Only generated-code urls take part in long url deduplication.
    let generated = common::shorten(&server, &key, "example.com").await;
    assert_eq!(common::code_of(&generated).len(), 9);

    let response = server
        .get("/api/short")
        .add_header(common::API_KEY_HEADER, key.as_str())
        .add_query_param("long_url", "example.com")
        .await;
    response.assert_status(StatusCode::CONFLICT);
}
