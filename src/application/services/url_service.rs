//! Short url creation, expansion, listing and redirect resolution.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{AccessRecord, NewUrl, UrlSummary};
use crate::domain::queries::{Page, RecordId, UrlQuery};
use crate::domain::repositories::{URLS_CODE_CONSTRAINT, UrlRepository};
use crate::error::AppError;
use crate::utils::canonicalize::canonicalize_url;
use crate::utils::code_generator::{allocate_code, validate_explicit_code};

/// Result of expanding a short url.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expanded {
    /// The short url exactly as supplied by the caller.
    pub short_url: String,
    pub long_url: String,
}

/// Service implementing the url use cases.
///
/// Holds no state besides the repository handle: every call re-reads or
/// re-writes the store, which stays the single source of truth. All
/// operations except [`Self::resolve_redirect`] are scoped to the owner.
pub struct UrlService<U: UrlRepository + ?Sized> {
    repository: Arc<U>,
}

impl<U: UrlRepository + ?Sized> UrlService<U> {
    /// Creates a new url service.
    pub fn new(repository: Arc<U>) -> Self {
        Self { repository }
    }

    /// Creates a short url for `owner`.
    ///
    /// # Flow
    ///
    /// 1. Canonicalize `long_url_raw`
    /// 2. Reject explicit codes longer than 9 characters
    /// 3. Reject duplicates: `(code, owner)` with an explicit code,
    ///    `(long_url, owner)` otherwise
    /// 4. Allocate a code (explicit or generated) and compose `<host>/<code>`
    /// 5. Insert; the insert is the single commit point
    ///
    /// A generated code that loses an insert race against a concurrent writer
    /// is replaced by a fresh one. Any other unique violation is reported as
    /// [`AppError::AlreadyExists`].
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] if the long url cannot be canonicalized
    /// - [`AppError::CodeTooLong`] if the explicit code exceeds 9 characters
    /// - [`AppError::AlreadyExists`] on a duplicate
    pub async fn create_short_url(
        &self,
        owner: RecordId,
        long_url_raw: &str,
        host: &str,
        explicit_code: Option<&str>,
    ) -> Result<String, AppError> {
        let long_url = canonicalize_url(long_url_raw)?;
        let explicit_code = explicit_code.filter(|code| !code.is_empty());

        if let Some(code) = explicit_code {
            validate_explicit_code(code)?;
        }

        let existing_query = match explicit_code {
            Some(code) => UrlQuery::ByOwnerAndCode {
                owner,
                code: code.to_string(),
            },
            None => UrlQuery::ByOwnerAndLongUrl {
                owner,
                long_url: long_url.clone(),
            },
        };

        if self
            .repository
            .find_one_url(&existing_query)
            .await?
            .is_some()
        {
            return Err(already_exists(&long_url, explicit_code));
        }

        let short_url = match explicit_code {
            Some(code) => {
                let new_url = NewUrl::compose(host, code.to_string(), long_url.clone(), true, owner);
                let short_url = new_url.short_url.clone();

                self.repository
                    .insert_url(new_url)
                    .await
                    .map_err(|e| conflict_as_already_exists(e, &long_url, explicit_code))?;

                short_url
            }
            None => self.insert_with_generated_code(owner, host, &long_url).await?,
        };

        info!(owner = %owner, short_url = %short_url, "Short url created");
        Ok(short_url)
    }

    /// Allocates a code and inserts, drawing again whenever the insert loses
    /// the code to a concurrent writer.
    async fn insert_with_generated_code(
        &self,
        owner: RecordId,
        host: &str,
        long_url: &str,
    ) -> Result<String, AppError> {
        loop {
            let code = allocate_code(self.repository.as_ref()).await?;
            let new_url = NewUrl::compose(host, code, long_url.to_string(), false, owner);
            let short_url = new_url.short_url.clone();

            match self.repository.insert_url(new_url).await {
                Ok(_) => return Ok(short_url),
                Err(e) if e.is_duplicate_on(URLS_CODE_CONSTRAINT) => {
                    warn!(short_url = %short_url, "Code taken by a concurrent insert, retrying");
                }
                Err(e) => return Err(conflict_as_already_exists(e, long_url, None)),
            }
        }
    }

    /// Expands a short url owned by `owner`.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] if the short url cannot be canonicalized
    /// - [`AppError::NotFound`] if the owner has no such short url
    pub async fn expand(&self, owner: RecordId, short_url_raw: &str) -> Result<Expanded, AppError> {
        let short_url = canonicalize_url(short_url_raw)?;

        let url = self
            .repository
            .find_one_url(&UrlQuery::ByOwnerAndShortUrl {
                owner,
                short_url: short_url.clone(),
            })
            .await?
            .ok_or_else(|| {
                AppError::not_found("short_url does not exist", json!({ "short_url": short_url }))
            })?;

        Ok(Expanded {
            short_url: short_url_raw.to_string(),
            long_url: url.long_url,
        })
    }

    /// Lists urls owned by `owner`, newest first, 5 per page.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidPage`] unless `page_raw` is absent or a positive integer.
    pub async fn list_urls(
        &self,
        owner: RecordId,
        page_raw: Option<&str>,
    ) -> Result<Vec<UrlSummary>, AppError> {
        let page = Page::parse(page_raw)?;

        let urls = self.repository.find_urls(owner, page).await?;
        debug!(owner = %owner, page = page.number(), count = urls.len(), "Listed urls");

        Ok(urls.into_iter().map(UrlSummary::from).collect())
    }

    /// Returns the url owned by `owner` with the given code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the owner has no url with that code.
    pub async fn get_url(&self, owner: RecordId, code: &str) -> Result<UrlSummary, AppError> {
        if code.is_empty() {
            return Err(url_not_found(code));
        }

        self.repository
            .find_one_url(&UrlQuery::ByOwnerAndCode {
                owner,
                code: code.to_string(),
            })
            .await?
            .map(UrlSummary::from)
            .ok_or_else(|| url_not_found(code))
    }

    /// Resolves a code to its long url and records the access.
    ///
    /// Owner-agnostic: any url with the code matches. The access record is
    /// appended atomically by the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no url has the code.
    pub async fn resolve_redirect(&self, code: &str) -> Result<String, AppError> {
        if code.is_empty() {
            return Err(url_not_found(code));
        }

        let url = self
            .repository
            .find_one_url(&UrlQuery::ByCode(code.to_string()))
            .await?
            .ok_or_else(|| url_not_found(code))?;

        self.repository
            .append_url_access(url.id, AccessRecord::now())
            .await?;

        debug!(code = %code, long_url = %url.long_url, "Redirect resolved");
        Ok(url.long_url)
    }

    /// Checks the backing store with a lookup that never matches.
    pub async fn check_store(&self) -> Result<(), AppError> {
        self.repository
            .find_one_url(&UrlQuery::ById(RecordId::new(0)))
            .await
            .map(|_| ())
    }
}

fn url_not_found(code: &str) -> AppError {
    AppError::not_found("URL not found", json!({ "code": code }))
}

fn already_exists(long_url: &str, code: Option<&str>) -> AppError {
    AppError::already_exists(
        "long_url already exists",
        json!({ "long_url": long_url, "code": code }),
    )
}

fn conflict_as_already_exists(e: AppError, long_url: &str, code: Option<&str>) -> AppError {
    match e {
        AppError::DuplicateKey { .. } => already_exists(long_url, code),
        other => other,
    }
}
