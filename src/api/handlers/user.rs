//! Handler for user registration.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::user::{RegisterRequest, RegisterResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Registers an email and returns its API key.
///
/// # Endpoint
///
/// `POST /api/user` (public)
///
/// # Request Body
///
/// ```json
/// { "email": "Jane <jane@example.com>" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "api_key": "<128 hex characters>" }
/// ```
///
/// The key cannot be retrieved again.
///
/// # Errors
///
/// - 400 `invalid_email` if the email is missing, not a string, or malformed
/// - 409 `already_exists` if the email is already registered
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let api_key = state.user_service.register_value(&payload.email).await?;

    Ok((StatusCode::CREATED, Json(RegisterResponse { api_key })))
}
