//! # Shortlink
//!
//! A small URL shortener backed by an embedded, durable key-value store.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - The [`domain::entities::ShortLink`] entity and the store trait
//! - **Application Layer** ([`application`]) - The [`Shortener`] service and expiry sweeper
//! - **Infrastructure Layer** ([`infrastructure`]) - redb-backed persistence
//! - **API Layer** ([`api`]) - Redirect, JSON and health handlers
//! - **Web Layer** ([`web`]) - Demo submission form
//!
//! ## How ids are made
//!
//! An id is the first `n` hex characters (default 8) of the SHA-256 digest
//! of the normalized URL joined with the creation timestamp. Ids are not
//! deterministic per URL; the same URL submitted twice gets two ids.
//!
//! ## Library use
//!
//! ```no_run
//! use shortlink::prelude::*;
//!
//! # async fn demo() -> Result<(), ShortenerError> {
//! let shortener = Shortener::open(ShortenerConfig::default())?;
//! let id = shortener.post("example.com", PostOptions::default()).await?;
//! assert_eq!(shortener.get(&id).await?, "http://example.com");
//! shortener.close().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use application::services::Shortener;
pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        PostOptions, Shortener, ShortenerConfig, ShortenerError,
    };
    pub use crate::domain::entities::ShortLink;
    pub use crate::domain::repositories::{LinkStore, StoreError};
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::RedbLinkStore;
    pub use crate::logging::{Logger, NullLogger, TracingLogger};
    pub use crate::state::AppState;
}
