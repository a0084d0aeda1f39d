//! Crate-wide error type.
//!
//! Every failure path in the service returns an [`AppError`] whose variant
//! names the failure kind, so callers (the HTTP layer, the admin CLI) can pick
//! a status code or exit message without inspecting message text.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload returned to HTTP clients.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    InvalidUrl { message: String, details: Value },

    #[error("{message}")]
    InvalidEmail { message: String, details: Value },

    #[error("{message}")]
    InvalidPage { message: String, details: Value },

    #[error("{message}")]
    CodeTooLong { message: String, details: Value },

    #[error("{message}")]
    AlreadyExists { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Store-level unique constraint violation. `constraint` names the index.
    #[error("{message}")]
    DuplicateKey {
        message: String,
        constraint: String,
        details: Value,
    },

    #[error("{message}")]
    InvalidQuery { message: String, details: Value },

    #[error("{message}")]
    Unauthorized { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn invalid_url(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidUrl {
            message: message.into(),
            details,
        }
    }

    pub fn invalid_email(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidEmail {
            message: message.into(),
            details,
        }
    }

    pub fn invalid_page(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidPage {
            message: message.into(),
            details,
        }
    }

    pub fn code_too_long(message: impl Into<String>, details: Value) -> Self {
        Self::CodeTooLong {
            message: message.into(),
            details,
        }
    }

    pub fn already_exists(message: impl Into<String>, details: Value) -> Self {
        Self::AlreadyExists {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn duplicate_key(constraint: impl Into<String>, details: Value) -> Self {
        let constraint = constraint.into();
        Self::DuplicateKey {
            message: format!("Unique constraint violation: {constraint}"),
            constraint,
            details,
        }
    }

    pub fn invalid_query(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidQuery {
            message: message.into(),
            details,
        }
    }

    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Stable machine-readable name of the failure kind.
    pub fn kind_code(&self) -> &'static str {
        match self {
            AppError::InvalidUrl { .. } => "invalid_url",
            AppError::InvalidEmail { .. } => "invalid_email",
            AppError::InvalidPage { .. } => "invalid_page",
            AppError::CodeTooLong { .. } => "code_too_long",
            AppError::AlreadyExists { .. } => "already_exists",
            AppError::NotFound { .. } => "not_found",
            AppError::DuplicateKey { .. } => "duplicate_key",
            AppError::InvalidQuery { .. } => "invalid_query",
            AppError::Unauthorized { .. } => "unauthorized",
            AppError::Internal { .. } => "internal_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidUrl { .. }
            | AppError::InvalidEmail { .. }
            | AppError::InvalidPage { .. }
            | AppError::CodeTooLong { .. }
            | AppError::InvalidQuery { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::AlreadyExists { .. } | AppError::DuplicateKey { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns true when this is a unique violation on the given constraint.
    pub fn is_duplicate_on(&self, name: &str) -> bool {
        matches!(self, AppError::DuplicateKey { constraint, .. } if constraint == name)
    }

    /// Converts the error into a serializable payload, consuming it.
    pub fn to_error_info(self) -> ErrorInfo {
        let code = self.kind_code();
        let (message, details) = match self {
            AppError::InvalidUrl { message, details }
            | AppError::InvalidEmail { message, details }
            | AppError::InvalidPage { message, details }
            | AppError::CodeTooLong { message, details }
            | AppError::AlreadyExists { message, details }
            | AppError::NotFound { message, details }
            | AppError::DuplicateKey {
                message, details, ..
            }
            | AppError::InvalidQuery { message, details }
            | AppError::Unauthorized { message, details }
            | AppError::Internal { message, details } => (message, details),
        };

        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let unauthorized = status == StatusCode::UNAUTHORIZED;

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        let mut response = (status, Json(body)).into_response();
        if unauthorized {
            response.headers_mut().insert(
                axum::http::header::WWW_AUTHENTICATE,
                axum::http::HeaderValue::from_static("X-Api-Key"),
            );
        }
        response
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            let constraint = db.constraint().unwrap_or("unknown").to_string();
            return AppError::duplicate_key(constraint.clone(), json!({ "constraint": constraint }));
        }

        tracing::error!("Database error: {}", e);
        AppError::internal("Database error", json!({}))
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        tracing::error!("Migration error: {}", e);
        AppError::internal("Migration error", json!({ "reason": e.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_per_kind() {
        assert_eq!(
            AppError::invalid_url("x", json!({})).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::invalid_page("x", json!({})).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::code_too_long("x", json!({})).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::already_exists("x", json!({})).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::not_found("x", json!({})).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::unauthorized("x", json!({})).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::internal("x", json!({})).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_duplicate_key_names_constraint() {
        let err = AppError::duplicate_key("urls_code_key", json!({}));

        assert!(err.is_duplicate_on("urls_code_key"));
        assert!(!err.is_duplicate_on("users_email_key"));
        assert_eq!(err.kind_code(), "duplicate_key");
        assert!(err.to_string().contains("urls_code_key"));
    }

    #[test]
    fn test_error_info_keeps_message_and_details() {
        let info = AppError::not_found("URL not found", json!({ "code": "abc" })).to_error_info();

        assert_eq!(info.code, "not_found");
        assert_eq!(info.message, "URL not found");
        assert_eq!(info.details["code"], "abc");
    }

    #[test]
    fn test_display_uses_message() {
        let err = AppError::invalid_email("Email is not valid", json!({}));
        assert_eq!(err.to_string(), "Email is not valid");
    }
}
