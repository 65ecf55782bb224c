//! Business logic services for the application layer.

pub mod expiry_sweeper;
pub mod shortener;

pub use expiry_sweeper::run_expiry_sweeper;
pub use shortener::{PostOptions, Shortener, ShortenerConfig, ShortenerError};
