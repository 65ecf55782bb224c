//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`ShortLink`] - A stored mapping from a generated id to a normalized URL

pub mod short_link;

pub use short_link::ShortLink;
