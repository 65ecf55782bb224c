//! redb implementation of the link store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redb::{Database, ReadableTable, TableDefinition};
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::domain::entities::ShortLink;
use crate::domain::repositories::{LinkStore, StoreError, StoreResult};

/// id -> normalized URL bytes.
const LINKS: TableDefinition<&str, &[u8]> = TableDefinition::new("links");

/// id -> expiry as unix epoch milliseconds. Absent for links without a TTL.
const LINK_EXPIRY: TableDefinition<&str, i64> = TableDefinition::new("link_expiry");

/// File-backed link store on top of a single redb database.
///
/// A link and its expiry are written in one write transaction, so readers
/// never see one without the other. redb serializes writers and gives
/// readers snapshot isolation; this type adds no locking around reads or
/// writes. The mutex only guards the open/closed state of the handle.
pub struct RedbLinkStore {
    db: Mutex<Option<Arc<Database>>>,
}

impl RedbLinkStore {
    /// Opens the database at `path`, creating the file and its parent
    /// directories when missing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if the directory cannot be created or
    /// the file cannot be opened (including when another process holds it).
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Backend(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }

        let db = Database::create(path).map_err(backend)?;

        // Create both tables up front so read transactions can always open them.
        let txn = db.begin_write().map_err(backend)?;
        txn.open_table(LINKS).map_err(backend)?;
        txn.open_table(LINK_EXPIRY).map_err(backend)?;
        txn.commit().map_err(backend)?;

        tracing::debug!(path = %path.display(), "Opened redb link store");

        Ok(Self {
            db: Mutex::new(Some(Arc::new(db))),
        })
    }

    fn handle(&self) -> StoreResult<Arc<Database>> {
        self.db
            .lock()
            .map_err(|_| StoreError::Backend("store handle lock poisoned".to_string()))?
            .clone()
            .ok_or(StoreError::Closed)
    }

    /// Runs a blocking redb operation off the async worker threads.
    async fn with_db<T, F>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&Database) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.handle()?;

        tokio::task::spawn_blocking(move || f(&db))
            .await
            .map_err(|e| StoreError::Backend(format!("store task failed: {}", e)))?
    }
}

fn backend(e: impl Into<redb::Error>) -> StoreError {
    StoreError::Backend(e.into().to_string())
}

fn insert_blocking(db: &Database, link: ShortLink) -> StoreResult<bool> {
    let now = Utc::now().timestamp_millis();
    let txn = db.begin_write().map_err(backend)?;

    let written = {
        let mut links = txn.open_table(LINKS).map_err(backend)?;
        let mut expiry = txn.open_table(LINK_EXPIRY).map_err(backend)?;

        let exists = links.get(link.id.as_str()).map_err(backend)?.is_some();
        let live = exists
            && expiry
                .get(link.id.as_str())
                .map_err(backend)?
                .map(|at| at.value())
                .is_none_or(|at| at > now);

        if live {
            false
        } else {
            links
                .insert(link.id.as_str(), link.url.as_bytes())
                .map_err(backend)?;

            match link.expires_at {
                Some(at) => {
                    expiry
                        .insert(link.id.as_str(), at.timestamp_millis())
                        .map_err(backend)?;
                }
                None => {
                    expiry.remove(link.id.as_str()).map_err(backend)?;
                }
            }
            true
        }
    };

    if written {
        txn.commit().map_err(backend)?;
    } else {
        txn.abort().map_err(backend)?;
    }

    Ok(written)
}

fn get_blocking(db: &Database, id: String) -> StoreResult<Option<ShortLink>> {
    let txn = db.begin_read().map_err(backend)?;
    let links = txn.open_table(LINKS).map_err(backend)?;

    let Some(raw) = links.get(id.as_str()).map_err(backend)? else {
        return Ok(None);
    };
    let url = String::from_utf8(raw.value().to_vec())
        .map_err(|e| StoreError::Corrupted(format!("link {} is not UTF-8: {}", id, e)))?;

    let expiry = txn.open_table(LINK_EXPIRY).map_err(backend)?;
    let expires_at = match expiry.get(id.as_str()).map_err(backend)? {
        Some(at) => Some(DateTime::<Utc>::from_timestamp_millis(at.value()).ok_or_else(
            || StoreError::Corrupted(format!("link {} has an out-of-range expiry", id)),
        )?),
        None => None,
    };

    let link = ShortLink::new(id, url, expires_at);
    if link.is_expired() {
        return Ok(None);
    }

    Ok(Some(link))
}

fn purge_blocking(db: &Database) -> StoreResult<usize> {
    let now = Utc::now().timestamp_millis();
    let txn = db.begin_write().map_err(backend)?;

    let removed = {
        let mut links = txn.open_table(LINKS).map_err(backend)?;
        let mut expiry = txn.open_table(LINK_EXPIRY).map_err(backend)?;

        let mut expired = Vec::new();
        for entry in expiry.iter().map_err(backend)? {
            let (id, at) = entry.map_err(backend)?;
            if at.value() <= now {
                expired.push(id.value().to_string());
            }
        }

        for id in &expired {
            links.remove(id.as_str()).map_err(backend)?;
            expiry.remove(id.as_str()).map_err(backend)?;
        }

        expired.len()
    };

    txn.commit().map_err(backend)?;
    Ok(removed)
}

#[async_trait]
impl LinkStore for RedbLinkStore {
    async fn insert(&self, link: ShortLink) -> StoreResult<bool> {
        self.with_db(move |db| insert_blocking(db, link)).await
    }

    async fn get(&self, id: &str) -> StoreResult<Option<ShortLink>> {
        let id = id.to_string();
        self.with_db(move |db| get_blocking(db, id)).await
    }

    async fn purge_expired(&self) -> StoreResult<usize> {
        self.with_db(purge_blocking).await
    }

    async fn close(&self) -> StoreResult<()> {
        let db = self
            .db
            .lock()
            .map_err(|_| StoreError::Backend("store handle lock poisoned".to_string()))?
            .take();

        match db {
            // In-flight operations hold their own clone; the file is released
            // when the last one finishes.
            Some(_) => Ok(()),
            None => Err(StoreError::Closed),
        }
    }

    async fn health_check(&self) -> bool {
        self.with_db(|db| {
            let txn = db.begin_read().map_err(backend)?;
            txn.open_table(LINKS).map_err(backend)?;
            Ok(())
        })
        .await
        .is_ok()
    }
}
