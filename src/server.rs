//! HTTP server initialization and runtime setup.
//!
//! Handles store opening, the expiry sweeper, and the Axum server lifecycle.

use crate::application::services::{Shortener, run_expiry_sweeper};
use crate::config::Config;
use crate::logging::TracingLogger;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::task::JoinHandle;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - redb link store (opened once, before accepting connections)
/// - Background expiry sweeper (unless disabled)
/// - Axum HTTP server with graceful shutdown
///
/// The store is closed exactly once, after the server has drained.
///
/// # Errors
///
/// Returns an error if:
/// - The store cannot be opened
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let shortener = Shortener::open(config.shortener_config(Arc::new(TracingLogger)))
        .with_context(|| format!("Failed to open store at {}", config.store_path.display()))?;
    let shortener = Arc::new(shortener);
    tracing::info!("Link store ready");

    let sweeper = (config.purge_interval_seconds > 0).then(|| {
        tracing::info!(
            "Expiry sweeper started (every {}s)",
            config.purge_interval_seconds
        );
        tokio::spawn(run_expiry_sweeper(
            shortener.clone(),
            Duration::from_secs(config.purge_interval_seconds),
        ))
    });

    let app = app_router(AppState::new(shortener.clone()));

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    let served = axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await;
    if let Err(e) = &served {
        tracing::error!("Server error: {}", e);
    }

    release(sweeper, &shortener).await?;
    tracing::info!("Shutdown complete");

    served.context("Server runtime error")
}

/// Stops the sweeper and closes the store. Runs whether or not serving failed.
async fn release(sweeper: Option<JoinHandle<()>>, shortener: &Shortener) -> Result<()> {
    if let Some(sweeper) = sweeper {
        sweeper.abort();
        let _ = sweeper.await;
    }
    shortener
        .close()
        .await
        .context("Failed to close link store")
}

/// Resolves on Ctrl+C, or on SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::{PostOptions, ShortenerConfig};
    use tempfile::TempDir;

    fn open_store(dir: &TempDir) -> Arc<Shortener> {
        let config = ShortenerConfig {
            store_path: dir.path().join("links.redb"),
            ..ShortenerConfig::default()
        };
        Arc::new(Shortener::open(config).unwrap())
    }

    #[tokio::test]
    async fn test_release_stops_sweeper_and_closes_store() {
        let dir = TempDir::new().unwrap();
        let shortener = open_store(&dir);
        let sweeper = tokio::spawn(run_expiry_sweeper(
            shortener.clone(),
            Duration::from_secs(3600),
        ));

        release(Some(sweeper), &shortener).await.unwrap();

        assert!(!shortener.health_check().await);
        assert!(
            shortener
                .post("example.com", PostOptions::default())
                .await
                .is_err()
        );
        assert!(shortener.close().await.is_err());
    }

    #[tokio::test]
    async fn test_release_without_sweeper() {
        let dir = TempDir::new().unwrap();
        let shortener = open_store(&dir);

        release(None, &shortener).await.unwrap();

        assert!(!shortener.health_check().await);
        let reopened = Shortener::open(ShortenerConfig {
            store_path: dir.path().join("links.redb"),
            ..ShortenerConfig::default()
        });
        assert!(reopened.is_ok());
    }

    #[tokio::test]
    async fn test_release_reports_already_closed_store() {
        let dir = TempDir::new().unwrap();
        let shortener = open_store(&dir);
        shortener.close().await.unwrap();

        assert!(release(None, &shortener).await.is_err());
    }
}
