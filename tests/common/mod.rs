#![allow(dead_code)]

use axum_test::TestServer;
use shortlink::application::services::{Shortener, ShortenerConfig};
use shortlink::routes::router;
use shortlink::state::AppState;
use std::sync::Arc;
use tempfile::TempDir;

/// Opens a shortener on a fresh store inside its own temp directory.
///
/// Keep the returned `TempDir` alive for as long as the store is used.
pub fn open_shortener() -> (TempDir, Arc<Shortener>) {
    open_shortener_with(ShortenerConfig::default())
}

/// Same as [`open_shortener`], with `store_path` overridden to the temp dir.
pub fn open_shortener_with(config: ShortenerConfig) -> (TempDir, Arc<Shortener>) {
    let dir = TempDir::new().unwrap();
    let config = ShortenerConfig {
        store_path: dir.path().join("links.redb"),
        ..config
    };

    let shortener = Shortener::open(config).unwrap();
    (dir, Arc::new(shortener))
}

pub fn create_test_server(shortener: Arc<Shortener>) -> TestServer {
    TestServer::new(router(AppState::new(shortener))).unwrap()
}

pub fn is_lower_hex(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}
