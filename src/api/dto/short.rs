//! DTOs for short url creation.

use serde::{Deserialize, Serialize};

/// Query parameters of `GET /api/short`.
#[derive(Debug, Default, Deserialize)]
pub struct ShortQuery {
    pub long_url: Option<String>,

    /// Explicit code; an empty value is treated as absent.
    pub code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ShortResponse {
    pub short_url: String,
}
