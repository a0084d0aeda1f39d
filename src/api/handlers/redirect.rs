//! Handler for short url redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its long url and records the access.
///
/// # Endpoint
///
/// `GET /s/{code}` (public)
///
/// Codes are global: the redirect works for any caller.
///
/// # Errors
///
/// Returns 404 Not Found if no url has the code.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let long_url = state.url_service.resolve_redirect(&code).await?;

    Ok(Redirect::permanent(&long_url))
}
