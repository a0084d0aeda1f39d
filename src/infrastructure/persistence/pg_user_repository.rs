//! PostgreSQL implementation of user repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUser, User};
use crate::domain::queries::{RecordId, UserQuery};
use crate::domain::repositories::{InsertResult, UserRepository};
use crate::error::AppError;

/// PostgreSQL repository for registered users.
///
/// API keys are stored as issued; they are already high-entropy digests.
pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    api_key: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        User {
            id: RecordId::new(r.id),
            email: r.email,
            api_key: r.api_key,
            created_at: r.created_at,
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn insert_user(&self, new_user: NewUser) -> Result<InsertResult, AppError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (email, api_key, created_at)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&new_user.email)
        .bind(&new_user.api_key)
        .bind(new_user.created_at)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(InsertResult {
            inserted_id: id.map(RecordId::new),
        })
    }

    async fn find_one_user(&self, query: &UserQuery) -> Result<Option<User>, AppError> {
        query.validate()?;

        let q = match query {
            UserQuery::ById(id) => sqlx::query_as::<_, UserRow>(
                "SELECT id, email, api_key, created_at FROM users WHERE id = $1",
            )
            .bind(id.get()),
            UserQuery::ByEmail(email) => sqlx::query_as::<_, UserRow>(
                "SELECT id, email, api_key, created_at FROM users WHERE email = $1",
            )
            .bind(email.as_str()),
            UserQuery::ByApiKey(key) => sqlx::query_as::<_, UserRow>(
                "SELECT id, email, api_key, created_at FROM users WHERE api_key = $1",
            )
            .bind(key.as_str()),
        };

        let row = q.fetch_optional(self.pool.as_ref()).await?;

        Ok(row.map(User::from))
    }
}
