#![allow(dead_code)]

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use short_url_service::infrastructure::persistence::InMemoryStore;
use short_url_service::routes::base_router;
use short_url_service::state::AppState;
use std::sync::Arc;

pub const SHORT_HOST: &str = "http://sho.rt";
pub const API_KEY_HEADER: &str = "X-Api-Key";

pub fn create_test_state() -> (AppState, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let state = AppState::new(store.clone(), store.clone(), SHORT_HOST);

    (state, store)
}

pub fn create_test_server() -> TestServer {
    let (state, _store) = create_test_state();
    TestServer::new(base_router(state)).unwrap()
}

/// Registers `email` and returns the issued API key.
pub async fn register(server: &TestServer, email: &str) -> String {
    let response = server
        .post("/api/user")
        .json(&json!({ "email": email }))
        .await;

    response.assert_status(StatusCode::CREATED);

    response.json::<Value>()["api_key"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Creates a short url through the API and returns it.
pub async fn shorten(server: &TestServer, api_key: &str, long_url: &str) -> String {
    let response = server
        .get("/api/short")
        .add_header(API_KEY_HEADER, api_key)
        .add_query_param("long_url", long_url)
        .await;

    response.assert_status(StatusCode::CREATED);

    response.json::<Value>()["short_url"]
        .as_str()
        .unwrap()
        .to_string()
}

pub fn code_of(short_url: &str) -> &str {
    short_url.rsplit('/').next().unwrap()
}
