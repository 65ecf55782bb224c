//! Storage trait for short link persistence.

use crate::domain::entities::ShortLink;
use async_trait::async_trait;

/// Errors raised by a [`LinkStore`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store was closed, or was never opened.
    #[error("store is closed or was never opened")]
    Closed,

    #[error("store backend error: {0}")]
    Backend(String),

    #[error("stored record is corrupted: {0}")]
    Corrupted(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Durable key-value store for short links.
///
/// Every operation is a single atomic transaction against one key (or,
/// for [`LinkStore::purge_expired`], one write transaction over the whole
/// store). Implementations handle their own concurrency control; callers
/// do not serialize reads and writes.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::RedbLinkStore`] - redb-backed file store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Writes a link unless a live entry already holds its id.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the link was written
    /// - `Ok(false)` if an unexpired entry with the same id exists (nothing written)
    ///
    /// Expired entries under the same id are overwritten.
    async fn insert(&self, link: ShortLink) -> StoreResult<bool>;

    /// Reads a link by id inside a read-only transaction.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(link))` if present and unexpired
    /// - `Ok(None)` if absent or expired
    async fn get(&self, id: &str) -> StoreResult<Option<ShortLink>>;

    /// Deletes every expired entry and returns how many were removed.
    async fn purge_expired(&self) -> StoreResult<usize>;

    /// Releases the store handle. Later calls fail with [`StoreError::Closed`].
    async fn close(&self) -> StoreResult<()>;

    /// Checks whether the store can serve a read transaction.
    async fn health_check(&self) -> bool;
}
