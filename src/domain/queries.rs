//! Typed store queries, identifiers and pagination.
//!
//! Repositories accept only the closed set of queries defined here. Each
//! query is validated before it reaches the store, and raw identifiers are
//! coerced to [`RecordId`] at the boundary.

use std::fmt;

use serde_json::json;

use crate::error::AppError;

/// Number of urls returned per listing page.
pub const PAGE_SIZE: i64 = 5;

/// Store-native record identifier (a positive 64-bit integer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(i64);

impl RecordId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn get(self) -> i64 {
        self.0
    }

    /// Parses a raw identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidQuery`] if the input is not a positive integer.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw.trim().parse::<i64>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(AppError::invalid_query(
                "Malformed identifier",
                json!({ "id": raw }),
            )),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lookup of a single url.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlQuery {
    ById(RecordId),
    /// Global lookup, owner-agnostic. Used by redirect resolution.
    ByCode(String),
    ByOwnerAndCode { owner: RecordId, code: String },
    /// Matches generated-code urls only; explicit-code urls never deduplicate.
    ByOwnerAndLongUrl { owner: RecordId, long_url: String },
    ByOwnerAndShortUrl { owner: RecordId, short_url: String },
}

impl UrlQuery {
    /// Rejects queries with empty string fields.
    pub fn validate(&self) -> Result<(), AppError> {
        let (field, value) = match self {
            UrlQuery::ById(_) => return Ok(()),
            UrlQuery::ByCode(code) | UrlQuery::ByOwnerAndCode { code, .. } => ("code", code),
            UrlQuery::ByOwnerAndLongUrl { long_url, .. } => ("long_url", long_url),
            UrlQuery::ByOwnerAndShortUrl { short_url, .. } => ("short_url", short_url),
        };

        require_non_empty(field, value)
    }

    /// Returns true if `url` satisfies this query.
    pub fn matches(&self, url: &crate::domain::entities::Url) -> bool {
        match self {
            UrlQuery::ById(id) => url.id == *id,
            UrlQuery::ByCode(code) => url.code == *code,
            UrlQuery::ByOwnerAndCode { owner, code } => url.created_by == *owner && url.code == *code,
            UrlQuery::ByOwnerAndLongUrl { owner, long_url } => {
                url.created_by == *owner && url.long_url == *long_url && !url.explicit_code
            }
            UrlQuery::ByOwnerAndShortUrl { owner, short_url } => {
                url.created_by == *owner && url.short_url == *short_url
            }
        }
    }
}

/// Lookup of a single user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserQuery {
    ById(RecordId),
    ByEmail(String),
    ByApiKey(String),
}

impl UserQuery {
    pub fn validate(&self) -> Result<(), AppError> {
        match self {
            UserQuery::ById(_) => Ok(()),
            UserQuery::ByEmail(email) => require_non_empty("email", email),
            UserQuery::ByApiKey(key) => require_non_empty("api_key", key),
        }
    }

    pub fn matches(&self, user: &crate::domain::entities::User) -> bool {
        match self {
            UserQuery::ById(id) => user.id == *id,
            UserQuery::ByEmail(email) => user.email == *email,
            UserQuery::ByApiKey(key) => user.api_key == *key,
        }
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<(), AppError> {
    if value.is_empty() {
        return Err(AppError::invalid_query(
            format!("Query field '{field}' must not be empty"),
            json!({ "field": field }),
        ));
    }
    Ok(())
}

/// 1-indexed listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page(u32);

impl Page {
    pub const FIRST: Page = Page(1);

    /// Parses a raw page parameter, defaulting to the first page when absent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidPage`] unless the input is a positive integer.
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        let Some(raw) = raw else {
            return Ok(Self::FIRST);
        };

        match raw.trim().parse::<u32>() {
            Ok(page) if page > 0 => Ok(Self(page)),
            _ => Err(AppError::invalid_page(
                "page param is not valid",
                json!({ "page": raw }),
            )),
        }
    }

    pub fn number(self) -> u32 {
        self.0
    }

    pub fn offset(self) -> i64 {
        (i64::from(self.0) - 1) * PAGE_SIZE
    }

    pub fn limit(self) -> i64 {
        PAGE_SIZE
    }
}
