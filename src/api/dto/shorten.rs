//! DTOs for link shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::id_generator::DIGEST_HEX_LENGTH;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The URL to shorten. A missing scheme defaults to `http`.
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub url: String,

    /// Optional lifetime in seconds. Absent or zero uses the configured default.
    pub ttl_seconds: Option<u64>,

    /// Optional id length.
    #[validate(range(min = 1, max = DIGEST_HEX_LENGTH, message = "length must be 1-64"))]
    pub length: Option<usize>,
}

/// Created short link.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub id: String,
    pub url: String,
    pub short_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}
