//! Demo UI route configuration.

use crate::state::AppState;
use crate::web::handlers::{home_handler, short_handler};
use axum::{Router, routing::get};

/// Demo UI routes.
///
/// # Endpoints
///
/// - `GET /` - Submission form
/// - `POST /` - Create a link from form field `u` and show it
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(home_handler).post(short_handler))
}
