//! API key authentication middleware.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use serde_json::json;

use crate::{error::AppError, state::AppState};

/// Header carrying the caller's API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Authenticates requests by the key in the `X-Api-Key` header.
///
/// # Header Format
///
/// ```text
/// X-Api-Key: <key issued at registration>
/// ```
///
/// On success the resolved [`crate::domain::entities::User`] is stored in the
/// request extensions, where handlers pick it up with `Extension<User>`.
///
/// # Errors
///
/// Returns `401 Unauthorized` if the header is missing, not valid UTF-8,
/// or does not match any registered user.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/urls", get(list_urls_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let api_key = extract_api_key(req.headers())?.to_string();

    let user = st.user_service.authenticate(&api_key).await?;

    tracing::debug!(user_id = %user.id, "Request authenticated");
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

fn extract_api_key(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "X-Api-Key header is missing or invalid" }),
            )
        })
}
