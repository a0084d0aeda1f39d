//! Handler for short url expansion.

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde_json::json;

use crate::api::dto::expand::{ExpandQuery, ExpandResponse};
use crate::domain::entities::User;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the long url behind one of the caller's short urls.
///
/// # Endpoint
///
/// `GET /api/expand?short_url=<short url>`
///
/// The lookup is scoped to the caller: another user's short url is not found.
pub async fn expand_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Query(params): Query<ExpandQuery>,
) -> Result<Json<ExpandResponse>, AppError> {
    let short_url = params
        .short_url
        .ok_or_else(|| AppError::invalid_url("short_url is required", json!({})))?;

    let expanded = state.url_service.expand(user.id, &short_url).await?;

    Ok(Json(expanded.into()))
}
