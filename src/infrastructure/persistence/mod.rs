//! Persistent link store implementations.
//!
//! # Stores
//!
//! - [`RedbLinkStore`] - Embedded, transactional file store built on redb

pub mod redb_link_store;

pub use redb_link_store::RedbLinkStore;
