//! PostgreSQL implementation of url repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{AccessRecord, NewUrl, Url};
use crate::domain::queries::{Page, RecordId, UrlQuery};
use crate::domain::repositories::{InsertResult, UrlRepository};
use crate::error::AppError;

/// PostgreSQL repository for url storage and retrieval.
///
/// Uniqueness is enforced by the schema (`urls_code_key`,
/// `urls_owner_long_url_key`); violations surface as [`AppError::DuplicateKey`].
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UrlRow {
    id: i64,
    code: String,
    short_url: String,
    long_url: String,
    explicit_code: bool,
    created_by: i64,
    created_at: DateTime<Utc>,
    url_access: Vec<DateTime<Utc>>,
}

impl From<UrlRow> for Url {
    fn from(r: UrlRow) -> Self {
        Url {
            id: RecordId::new(r.id),
            code: r.code,
            short_url: r.short_url,
            long_url: r.long_url,
            explicit_code: r.explicit_code,
            created_by: RecordId::new(r.created_by),
            created_at: r.created_at,
            url_access: r
                .url_access
                .into_iter()
                .map(|date| AccessRecord { date })
                .collect(),
        }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn find_one_url(&self, query: &UrlQuery) -> Result<Option<Url>, AppError> {
        query.validate()?;

        let q = match query {
            UrlQuery::ById(id) => sqlx::query_as::<_, UrlRow>(
                r#"
                SELECT id, code, short_url, long_url, explicit_code, created_by, created_at, url_access
                FROM urls
                WHERE id = $1
                "#,
            )
            .bind(id.get()),
            UrlQuery::ByCode(code) => sqlx::query_as::<_, UrlRow>(
                r#"
                SELECT id, code, short_url, long_url, explicit_code, created_by, created_at, url_access
                FROM urls
                WHERE code = $1
                "#,
            )
            .bind(code.as_str()),
            UrlQuery::ByOwnerAndCode { owner, code } => sqlx::query_as::<_, UrlRow>(
                r#"
                SELECT id, code, short_url, long_url, explicit_code, created_by, created_at, url_access
                FROM urls
                WHERE created_by = $1 AND code = $2
                "#,
            )
            .bind(owner.get())
            .bind(code.as_str()),
            UrlQuery::ByOwnerAndLongUrl { owner, long_url } => sqlx::query_as::<_, UrlRow>(
                r#"
                SELECT id, code, short_url, long_url, explicit_code, created_by, created_at, url_access
                FROM urls
                WHERE created_by = $1 AND long_url = $2 AND NOT explicit_code
                ORDER BY created_at DESC
                LIMIT 1
                "#,
            )
            .bind(owner.get())
            .bind(long_url.as_str()),
            UrlQuery::ByOwnerAndShortUrl { owner, short_url } => sqlx::query_as::<_, UrlRow>(
                r#"
                SELECT id, code, short_url, long_url, explicit_code, created_by, created_at, url_access
                FROM urls
                WHERE created_by = $1 AND short_url = $2
                "#,
            )
            .bind(owner.get())
            .bind(short_url.as_str()),
        };

        let row = q.fetch_optional(self.pool.as_ref()).await?;

        Ok(row.map(Url::from))
    }

    async fn find_urls(&self, owner: RecordId, page: Page) -> Result<Vec<Url>, AppError> {
        let rows = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, code, short_url, long_url, explicit_code, created_by, created_at, url_access
            FROM urls
            WHERE created_by = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(owner.get())
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Url::from).collect())
    }

    async fn insert_url(&self, new_url: NewUrl) -> Result<InsertResult, AppError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO urls (code, short_url, long_url, explicit_code, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&new_url.code)
        .bind(&new_url.short_url)
        .bind(&new_url.long_url)
        .bind(new_url.explicit_code)
        .bind(new_url.created_by.get())
        .bind(new_url.created_at)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(InsertResult {
            inserted_id: id.map(RecordId::new),
        })
    }

    async fn append_url_access(
        &self,
        url_id: RecordId,
        record: AccessRecord,
    ) -> Result<(), AppError> {
        // Single-statement update: the row lock serializes concurrent appends.
        let result = sqlx::query(
            r#"
            UPDATE urls
            SET url_access = array_append(url_access, $2)
            WHERE id = $1
            "#,
        )
        .bind(url_id.get())
        .bind(record.date)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "URL not found",
                json!({ "id": url_id.get() }),
            ));
        }

        Ok(())
    }
}
