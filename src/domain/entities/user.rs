//! User entity representing an API consumer.

use chrono::{DateTime, Utc};

use crate::domain::queries::RecordId;

/// A registered user. Never mutated after creation.
#[derive(Debug, Clone)]
pub struct User {
    pub id: RecordId,
    pub email: String,
    pub api_key: String,
    pub created_at: DateTime<Utc>,
}

/// Input data for registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub api_key: String,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn new(email: String, api_key: String) -> Self {
        Self {
            email,
            api_key,
            created_at: Utc::now(),
        }
    }

    pub fn into_user(self, id: RecordId) -> User {
        User {
            id,
            email: self.email,
            api_key: self.api_key,
            created_at: self.created_at,
        }
    }
}
