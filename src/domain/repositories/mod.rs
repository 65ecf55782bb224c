//! Repository trait definitions for the domain layer.
//!
//! These traits abstract the key-value store following the Repository
//! pattern. Implementations live in `crate::infrastructure::persistence`;
//! mock implementations are auto-generated via `mockall` for testing.
//!
//! # Available Repositories
//!
//! - [`LinkStore`] - Short link persistence with per-entry expiry

pub mod link_store;

pub use link_store::{LinkStore, StoreError, StoreResult};

#[cfg(test)]
pub use link_store::MockLinkStore;
