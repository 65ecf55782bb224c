//! Utility functions for id generation, URL processing, and request handling.
//!
//! - [`id_generator`] - Short id derivation from a URL and a timestamp
//! - [`url_normalizer`] - URL validation and scheme defaulting
//! - [`host`] - Public short URL construction from the `Host` header

pub mod host;
pub mod id_generator;
pub mod url_normalizer;
