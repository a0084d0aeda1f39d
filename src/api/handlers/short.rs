//! Handler for short url creation.

use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde_json::json;

use crate::api::dto::short::{ShortQuery, ShortResponse};
use crate::domain::entities::User;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short url for the authenticated user.
///
/// # Endpoint
///
/// `GET /api/short?long_url=<url>[&code=<code>]`
///
/// Without `code` a random 9-letter code is generated, and asking twice for
/// the same long url is a conflict. With `code` the given code is used as is.
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "short_url": "https://sho.rt/AbCdEfGhI" }
/// ```
///
/// # Errors
///
/// - 400 `invalid_url` if `long_url` is missing or not a url
/// - 400 `code_too_long` if `code` exceeds 9 characters
/// - 409 `already_exists` if the code or long url is taken
pub async fn short_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Query(params): Query<ShortQuery>,
) -> Result<(StatusCode, Json<ShortResponse>), AppError> {
    let long_url = params
        .long_url
        .ok_or_else(|| AppError::invalid_url("long_url is required", json!({})))?;

    let short_url = state
        .url_service
        .create_short_url(
            user.id,
            &long_url,
            &state.short_host,
            params.code.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ShortResponse { short_url })))
}
