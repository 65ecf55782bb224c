//! Background removal of expired links.
//!
//! Expired links already read as missing; the sweeper reclaims their space
//! in the store file.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::application::services::{Shortener, ShortenerError};
use crate::domain::repositories::StoreError;

/// Purges expired links every `every` until the store is closed.
///
/// The first sweep runs one full period after start. Sweep failures are
/// logged and retried on the next tick.
pub async fn run_expiry_sweeper(shortener: Arc<Shortener>, every: Duration) {
    let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + every, every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        match shortener.purge_expired().await {
            Ok(0) => debug!("Expiry sweep found nothing to purge"),
            Ok(removed) => info!("Expiry sweep removed {} links", removed),
            Err(ShortenerError::Storage(StoreError::Closed)) => {
                debug!("Store closed, stopping expiry sweeper");
                break;
            }
            Err(e) => warn!("Expiry sweep failed: {}", e),
        }
    }
}
