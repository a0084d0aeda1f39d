//! Handlers for the caller's url listing.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};

use crate::api::dto::urls::ListUrlsQuery;
use crate::domain::entities::{UrlSummary, User};
use crate::error::AppError;
use crate::state::AppState;

/// Lists the caller's urls, newest first, five per page.
///
/// # Endpoint
///
/// `GET /api/urls[?page=<n>]`
///
/// # Response
///
/// ```json
/// [
///   {
///     "long_url": "http://example.com",
///     "short_url": "https://sho.rt/AbCdEfGhI",
///     "code": "AbCdEfGhI",
///     "created_at": "2026-03-01T10:00:00Z",
///     "url_access": [{ "date": "2026-03-01T10:05:00Z" }],
///     "total_accesses": 1
///   }
/// ]
/// ```
///
/// A page past the end is an empty array.
///
/// # Errors
///
/// Returns 400 `invalid_page` for `0`, negative or non-numeric pages.
pub async fn list_urls_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Query(params): Query<ListUrlsQuery>,
) -> Result<Json<Vec<UrlSummary>>, AppError> {
    let urls = state
        .url_service
        .list_urls(user.id, params.page.as_deref())
        .await?;

    Ok(Json(urls))
}

/// Returns one of the caller's urls by code.
///
/// # Endpoint
///
/// `GET /api/urls/{code}`
pub async fn get_url_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(code): Path<String>,
) -> Result<Json<UrlSummary>, AppError> {
    let url = state.url_service.get_url(user.id, &code).await?;

    Ok(Json(url))
}
