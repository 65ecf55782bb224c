//! ShortLink entity representing a stored id to URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL mapping.
///
/// `id` is a prefix of a hex digest and is not guaranteed unique across
/// time; `url` is always the scheme-normalized form of the submitted URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub id: String,
    pub url: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl ShortLink {
    /// Creates a new ShortLink instance.
    pub fn new(id: String, url: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            id,
            url,
            expires_at,
        }
    }

    /// Returns true if the link has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Returns true if the link is expired relative to `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| now >= e)
    }
}
