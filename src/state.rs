use std::sync::Arc;

use crate::application::services::Shortener;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<Shortener>,
}

impl AppState {
    pub fn new(shortener: Arc<Shortener>) -> Self {
        Self { shortener }
    }
}
