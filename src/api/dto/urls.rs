//! DTOs for owned url listing.

use serde::Deserialize;

/// Query parameters of `GET /api/urls`.
///
/// `page` is parsed by [`crate::domain::queries::Page::parse`] so that `0`,
/// negative and non-numeric values are reported as `InvalidPage`.
#[derive(Debug, Default, Deserialize)]
pub struct ListUrlsQuery {
    pub page: Option<String>,
}
