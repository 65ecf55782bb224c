//! Link creation and lookup service.

use chrono::{DateTime, Utc};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::ShortLink;
use crate::domain::repositories::{LinkStore, StoreError};
use crate::infrastructure::persistence::RedbLinkStore;
use crate::logging::{Logger, NullLogger};
use crate::utils::id_generator::{DEFAULT_LENGTH, generate_id};
use crate::utils::url_normalizer::{UrlNormalizationError, normalize_url};

/// Maximum number of ids tried for one submission before giving up.
const MAX_ATTEMPTS: usize = 10;

/// File name of the store when no path is configured.
const DEFAULT_STORE_FILE: &str = "shortlink.redb";

/// Errors returned by [`Shortener`] operations.
#[derive(Debug, thiserror::Error)]
pub enum ShortenerError {
    #[error(transparent)]
    Parse(#[from] UrlNormalizationError),

    #[error("Short link not found: {id}")]
    NotFound { id: String },

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("TTL of {0:?} is out of range")]
    InvalidTtl(Duration),

    #[error("No free id found after {attempts} attempts")]
    IdSpaceExhausted { attempts: usize },
}

/// Construction-time settings for a [`Shortener`].
///
/// A `default_ttl` of `None` (or zero) means links never expire unless a
/// request sets a TTL. A `default_length` of zero falls back to
/// [`DEFAULT_LENGTH`].
#[derive(Clone)]
pub struct ShortenerConfig {
    pub store_path: PathBuf,
    pub default_ttl: Option<Duration>,
    pub default_length: usize,
    pub logger: Arc<dyn Logger>,
}

impl ShortenerConfig {
    /// Returns the store path used when none is configured.
    pub fn default_store_path() -> PathBuf {
        std::env::temp_dir().join(DEFAULT_STORE_FILE)
    }
}

impl Default for ShortenerConfig {
    fn default() -> Self {
        Self {
            store_path: Self::default_store_path(),
            default_ttl: None,
            default_length: DEFAULT_LENGTH,
            logger: Arc::new(NullLogger),
        }
    }
}

impl fmt::Debug for ShortenerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortenerConfig")
            .field("store_path", &self.store_path)
            .field("default_ttl", &self.default_ttl)
            .field("default_length", &self.default_length)
            .finish_non_exhaustive()
    }
}

/// Per-request overrides for [`Shortener::post`].
///
/// Unset or zero fields fall back to the shortener's defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostOptions {
    pub ttl: Option<Duration>,
    pub length: Option<usize>,
}

impl PostOptions {
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }
}

/// Service for creating and resolving short links.
///
/// Holds one opened store for its whole life. Calls are not serialized
/// here; concurrent `post`/`get` calls rely on the store's transactions.
pub struct Shortener {
    store: Arc<dyn LinkStore>,
    default_ttl: Option<Duration>,
    default_length: usize,
    logger: Arc<dyn Logger>,
}

impl Shortener {
    /// Opens the redb store at `config.store_path` and returns a ready service.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenerError::Storage`] if the store cannot be opened.
    pub fn open(config: ShortenerConfig) -> Result<Self, ShortenerError> {
        let store = RedbLinkStore::open(&config.store_path)?;
        config.logger.info(format_args!(
            "Opened link store at {}",
            config.store_path.display()
        ));
        Ok(Self::new(Arc::new(store), config))
    }

    /// Creates a service over an already opened store.
    pub fn new(store: Arc<dyn LinkStore>, config: ShortenerConfig) -> Self {
        let default_length = if config.default_length == 0 {
            DEFAULT_LENGTH
        } else {
            config.default_length
        };

        Self {
            store,
            default_ttl: config.default_ttl.filter(|ttl| !ttl.is_zero()),
            default_length,
            logger: config.logger,
        }
    }

    /// Stores `url` and returns the id that now resolves to it.
    ///
    /// # Flow
    ///
    /// 1. Normalize the URL (scheme defaults to `http`)
    /// 2. Resolve length and TTL from `options`, then instance defaults
    /// 3. Derive an id from the normalized URL and the current time
    /// 4. Write the link in one store transaction
    ///
    /// If a live link already holds the derived id, a new id is derived from
    /// a fresh timestamp, up to 10 times.
    ///
    /// # Errors
    ///
    /// - [`ShortenerError::Parse`] if the input is not a URL
    /// - [`ShortenerError::InvalidTtl`] if the TTL overflows the clock
    /// - [`ShortenerError::Storage`] if the write fails (not retried)
    /// - [`ShortenerError::IdSpaceExhausted`] if every attempt collided
    pub async fn post(&self, url: &str, options: PostOptions) -> Result<String, ShortenerError> {
        self.post_link(url, options).await.map(|link| link.id)
    }

    /// Same as [`Self::post`], returning the whole stored link.
    ///
    /// # Errors
    ///
    /// Same as [`Self::post`].
    pub async fn post_link(
        &self,
        url: &str,
        options: PostOptions,
    ) -> Result<ShortLink, ShortenerError> {
        let normalized = normalize_url(url)?;
        if normalized != url.trim() {
            self.logger
                .debug(format_args!("Normalized {} to {}", url, normalized));
        }

        let length = self.resolve_length(options);
        let ttl = self.resolve_ttl(options);

        for attempt in 1..=MAX_ATTEMPTS {
            let now = Utc::now();
            let expires_at = ttl.map(|ttl| expiry_after(now, ttl)).transpose()?;
            let id = generate_id(&normalized, now, length);

            let link = ShortLink::new(id.clone(), normalized.clone(), expires_at);
            if self.store.insert(link.clone()).await? {
                match ttl {
                    Some(ttl) => self.logger.info(format_args!(
                        "New entry: {} - {} (ttl: {:?})",
                        id, normalized, ttl
                    )),
                    None => self
                        .logger
                        .info(format_args!("New entry: {} - {}", id, normalized)),
                }
                return Ok(link);
            }

            self.logger.warn(format_args!(
                "Id {} already taken (attempt {}/{})",
                id, attempt, MAX_ATTEMPTS
            ));
        }

        Err(ShortenerError::IdSpaceExhausted {
            attempts: MAX_ATTEMPTS,
        })
    }

    /// Returns the URL stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenerError::NotFound`] if the id is absent or expired.
    /// Returns [`ShortenerError::Storage`] if the read fails.
    pub async fn get(&self, id: &str) -> Result<String, ShortenerError> {
        self.get_link(id).await.map(|link| link.url)
    }

    /// Returns the full stored link, including its expiry.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get`].
    pub async fn get_link(&self, id: &str) -> Result<ShortLink, ShortenerError> {
        match self.store.get(id).await? {
            Some(link) => {
                self.logger
                    .info(format_args!("Get entry: {} - {}", link.id, link.url));
                Ok(link)
            }
            None => {
                self.logger.debug(format_args!("No entry for {}", id));
                Err(ShortenerError::NotFound { id: id.to_string() })
            }
        }
    }

    /// Deletes expired links from the store and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenerError::Storage`] if the sweep fails.
    pub async fn purge_expired(&self) -> Result<usize, ShortenerError> {
        let removed = self.store.purge_expired().await?;
        if removed > 0 {
            self.logger
                .info(format_args!("Purged {} expired entries", removed));
        }
        Ok(removed)
    }

    /// Releases the store. Every later call fails with a storage error.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenerError::Storage`] if the store was already closed.
    pub async fn close(&self) -> Result<(), ShortenerError> {
        self.logger.info(format_args!("Closing link store"));
        self.store.close().await.map_err(|e| {
            self.logger
                .error(format_args!("Failed to close link store: {}", e));
            ShortenerError::from(e)
        })
    }

    /// Returns whether the store can currently serve reads.
    pub async fn health_check(&self) -> bool {
        self.store.health_check().await
    }

    /// Id length applied when a request does not set one.
    pub fn default_length(&self) -> usize {
        self.default_length
    }

    /// TTL applied when a request does not set one.
    pub fn default_ttl(&self) -> Option<Duration> {
        self.default_ttl
    }

    fn resolve_length(&self, options: PostOptions) -> usize {
        options
            .length
            .filter(|n| *n > 0)
            .unwrap_or(self.default_length)
    }

    fn resolve_ttl(&self, options: PostOptions) -> Option<Duration> {
        options
            .ttl
            .filter(|ttl| !ttl.is_zero())
            .or(self.default_ttl)
    }
}

fn expiry_after(now: DateTime<Utc>, ttl: Duration) -> Result<DateTime<Utc>, ShortenerError> {
    chrono::Duration::from_std(ttl)
        .ok()
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or(ShortenerError::InvalidTtl(ttl))
}
