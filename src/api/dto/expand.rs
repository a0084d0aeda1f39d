//! DTOs for short url expansion.

use serde::{Deserialize, Serialize};

use crate::application::services::Expanded;

/// Query parameters of `GET /api/expand`.
#[derive(Debug, Default, Deserialize)]
pub struct ExpandQuery {
    pub short_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExpandResponse {
    pub short_url: String,
    pub long_url: String,
}

impl From<Expanded> for ExpandResponse {
    fn from(e: Expanded) -> Self {
        Self {
            short_url: e.short_url,
            long_url: e.long_url,
        }
    }
}
