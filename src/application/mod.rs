//! Application layer services implementing business logic.
//!
//! This layer orchestrates URL normalization, id generation and the store
//! calls behind a small API consumed by HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::shortener::Shortener`] - Short link creation and lookup

pub mod services;
