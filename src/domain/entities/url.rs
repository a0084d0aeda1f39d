//! Url entity representing a shortened URL and its access log.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::queries::RecordId;

/// Maximum length of a short code, generated or explicit.
pub const MAX_CODE_LEN: usize = 9;

/// One redirect resolution of a [`Url`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccessRecord {
    pub date: DateTime<Utc>,
}

impl AccessRecord {
    /// Access record stamped with the current time.
    pub fn now() -> Self {
        Self { date: Utc::now() }
    }
}

/// A shortened URL owned by a user.
///
/// `url_access` is append-only: insertion order is chronological order.
#[derive(Debug, Clone)]
pub struct Url {
    pub id: RecordId,
    pub code: String,
    pub short_url: String,
    pub long_url: String,
    /// True when the owner supplied the code instead of having one generated.
    pub explicit_code: bool,
    pub created_by: RecordId,
    pub created_at: DateTime<Utc>,
    pub url_access: Vec<AccessRecord>,
}

impl Url {
    pub fn total_accesses(&self) -> usize {
        self.url_access.len()
    }
}

/// Input data for inserting a new url. `url_access` starts empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrl {
    pub code: String,
    pub short_url: String,
    pub long_url: String,
    pub explicit_code: bool,
    pub created_by: RecordId,
    pub created_at: DateTime<Utc>,
}

impl NewUrl {
    /// Builds a new url, composing `short_url` as `<host>/<code>`.
    pub fn compose(
        host: &str,
        code: String,
        long_url: String,
        explicit_code: bool,
        created_by: RecordId,
    ) -> Self {
        Self {
            short_url: format!("{}/{}", host, code),
            code,
            long_url,
            explicit_code,
            created_by,
            created_at: Utc::now(),
        }
    }

    /// Turns the insert payload into a stored record with the assigned id.
    pub fn into_url(self, id: RecordId) -> Url {
        Url {
            id,
            code: self.code,
            short_url: self.short_url,
            long_url: self.long_url,
            explicit_code: self.explicit_code,
            created_by: self.created_by,
            created_at: self.created_at,
            url_access: Vec::new(),
        }
    }
}

/// Owner-facing view of a url.
#[derive(Debug, Clone, Serialize)]
pub struct UrlSummary {
    pub long_url: String,
    pub short_url: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub url_access: Vec<AccessRecord>,
    pub total_accesses: usize,
}

impl From<Url> for UrlSummary {
    fn from(url: Url) -> Self {
        Self {
            total_accesses: url.url_access.len(),
            long_url: url.long_url,
            short_url: url.short_url,
            code: url.code,
            created_at: url.created_at,
            url_access: url.url_access,
        }
    }
}
