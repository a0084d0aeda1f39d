//! Repository trait for user data access.

use crate::domain::entities::{NewUser, User};
use crate::domain::queries::UserQuery;
use crate::domain::repositories::InsertResult;
use crate::error::AppError;
use async_trait::async_trait;

/// Unique constraint on `User.email`.
pub const USERS_EMAIL_CONSTRAINT: &str = "users_email_key";

/// Unique constraint on `User.api_key`.
pub const USERS_API_KEY_CONSTRAINT: &str = "users_api_key_key";

/// Repository interface for registered users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateKey`] naming [`USERS_EMAIL_CONSTRAINT`] if the email
    /// is already registered.
    async fn insert_user(&self, new_user: NewUser) -> Result<InsertResult, AppError>;

    /// Finds a single user matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidQuery`] if the query is malformed.
    async fn find_one_user(&self, query: &UserQuery) -> Result<Option<User>, AppError>;
}
