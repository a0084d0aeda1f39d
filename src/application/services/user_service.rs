//! User registration and API key authentication.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::info;

use crate::domain::entities::{NewUser, User};
use crate::domain::queries::{RecordId, UserQuery};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::api_key::issue_api_key;
use crate::utils::canonicalize::{canonicalize_email, canonicalize_email_value};

/// Service for registering users and authenticating them by API key.
///
/// Keys are issued once at registration and never shown again: there is no
/// retrieval path, and the salt used to derive them is not kept.
pub struct UserService<R: UserRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: UserRepository + ?Sized> UserService<R> {
    /// Creates a new user service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Registers a user and returns the freshly issued API key.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidEmail`] if the email cannot be canonicalized
    /// - [`AppError::AlreadyExists`] if the email is already registered
    /// - [`AppError::Internal`] if the store acknowledged the insert without an id
    pub async fn register(&self, email_raw: &str) -> Result<String, AppError> {
        let email = canonicalize_email(email_raw)?;
        self.register_canonical(email).await
    }

    /// Registers a user from an untyped JSON value, rejecting non-strings.
    ///
    /// # Errors
    ///
    /// See [`Self::register`].
    pub async fn register_value(&self, email_raw: &Value) -> Result<String, AppError> {
        let email = canonicalize_email_value(email_raw)?;
        self.register_canonical(email).await
    }

    async fn register_canonical(&self, email: String) -> Result<String, AppError> {
        if self
            .repository
            .find_one_user(&UserQuery::ByEmail(email.clone()))
            .await?
            .is_some()
        {
            return Err(user_exists(&email));
        }

        let api_key = issue_api_key(&email)?;

        let result = self
            .repository
            .insert_user(NewUser::new(email.clone(), api_key.clone()))
            .await
            .map_err(|e| match e {
                AppError::DuplicateKey { .. } => user_exists(&email),
                other => other,
            })?;

        let Some(id) = result.inserted_id else {
            return Err(AppError::internal(
                "Error on creating user. Internal Error",
                json!({ "email": email }),
            ));
        };

        info!(user_id = %id, "User registered");
        Ok(api_key)
    }

    /// Resolves the user owning `api_key`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the key is empty or unknown.
    pub async fn authenticate(&self, api_key: &str) -> Result<User, AppError> {
        if api_key.is_empty() {
            return Err(invalid_key());
        }

        self.repository
            .find_one_user(&UserQuery::ByApiKey(api_key.to_string()))
            .await?
            .ok_or_else(invalid_key)
    }

    /// Finds a user by email, canonicalizing the input first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidEmail`] or [`AppError::NotFound`].
    pub async fn find_by_email(&self, email_raw: &str) -> Result<User, AppError> {
        let email = canonicalize_email(email_raw)?;

        self.repository
            .find_one_user(&UserQuery::ByEmail(email.clone()))
            .await?
            .ok_or_else(|| AppError::not_found("User does not exist", json!({ "email": email })))
    }

    /// Finds a user by a raw identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidQuery`] if `id_raw` is not a positive integer,
    /// or [`AppError::NotFound`].
    pub async fn find_by_id(&self, id_raw: &str) -> Result<User, AppError> {
        let id = RecordId::parse(id_raw)?;

        self.repository
            .find_one_user(&UserQuery::ById(id))
            .await?
            .ok_or_else(|| AppError::not_found("User does not exist", json!({ "id": id.get() })))
    }
}

fn user_exists(email: &str) -> AppError {
    AppError::already_exists("User already exists", json!({ "email": email }))
}

fn invalid_key() -> AppError {
    AppError::unauthorized("Unauthorized", json!({ "reason": "Invalid API key" }))
}
