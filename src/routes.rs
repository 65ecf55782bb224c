//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `GET  /r/{id}`      - Short link redirect
//! - `GET  /health`      - Store health check
//! - `POST /api/shorten` - JSON link creation
//! - `GET  /`, `POST /`  - Demo submission form
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use crate::web;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the application routes with tracing, without path normalization.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/r/{id}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api::routes::api_routes())
        .merge(web::routes::routes())
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
///
/// Trailing slashes are trimmed before routing, so `/r/{id}/` resolves the
/// same link as `/r/{id}`.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
