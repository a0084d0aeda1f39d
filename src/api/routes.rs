//! API route configuration.

use crate::api::handlers::{
    expand_handler, get_url_handler, list_urls_handler, register_handler, short_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes that require an `X-Api-Key`, see [`crate::api::middleware::auth`].
///
/// # Endpoints
///
/// - `GET /short`        - Create a short url
/// - `GET /expand`       - Expand one of the caller's short urls
/// - `GET /urls`         - List the caller's urls (paginated)
/// - `GET /urls/{code}`  - One of the caller's urls by code
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/short", get(short_handler))
        .route("/expand", get(expand_handler))
        .route("/urls", get(list_urls_handler))
        .route("/urls/{code}", get(get_url_handler))
}

/// Routes open to anonymous callers.
///
/// - `POST /user` - Register an email and receive an API key
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/user", post(register_handler))
}
