//! Repository trait for url data access.

use crate::domain::entities::{AccessRecord, NewUrl, Url};
use crate::domain::queries::{Page, RecordId, UrlQuery};
use crate::error::AppError;
use async_trait::async_trait;

/// Unique constraint on `Url.code` (global, owner-independent).
pub const URLS_CODE_CONSTRAINT: &str = "urls_code_key";

/// Unique constraint on `(created_by, long_url)` for generated-code urls.
pub const URLS_OWNER_LONG_URL_CONSTRAINT: &str = "urls_owner_long_url_key";

/// Store acknowledgement of an insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertResult {
    /// Identifier assigned by the store, if it reported one.
    pub inserted_id: Option<RecordId>,
}

impl InsertResult {
    pub fn with_id(id: RecordId) -> Self {
        Self {
            inserted_id: Some(id),
        }
    }
}

/// Repository interface for shortened urls.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryStore`] - in-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Finds a single url matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidQuery`] if the query is malformed.
    /// Returns [`AppError::Internal`] on store errors.
    async fn find_one_url(&self, query: &UrlQuery) -> Result<Option<Url>, AppError>;

    /// Lists urls created by `owner`, newest `created_at` first, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn find_urls(&self, owner: RecordId, page: Page) -> Result<Vec<Url>, AppError>;

    /// Inserts a new url with an empty access log.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateKey`] naming [`URLS_CODE_CONSTRAINT`] if the code is
    /// taken, or [`URLS_OWNER_LONG_URL_CONSTRAINT`] if the owner already shortened the
    /// same long url with a generated code.
    async fn insert_url(&self, new_url: NewUrl) -> Result<InsertResult, AppError>;

    /// Atomically appends an access record to a url's access log.
    ///
    /// Read-free: concurrent appends to the same url never lose a record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no url has the given id.
    async fn append_url_access(&self, url_id: RecordId, record: AccessRecord)
    -> Result<(), AppError>;
}
