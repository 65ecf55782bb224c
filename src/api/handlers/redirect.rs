//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{error, info};
use url::Url;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short id to its stored URL.
///
/// # Endpoint
///
/// `GET /r/{id}`
///
/// # Request Flow
///
/// 1. Take the final path segment as the id
/// 2. Look the id up through the shortener
/// 3. Re-validate the stored URL
/// 4. Return 301 Moved Permanently with `Location` set to it
///
/// # Errors
///
/// Returns 404 Not Found if the id is unknown or its link expired.
/// Returns 500 Internal Server Error on storage faults, or if the stored URL
/// cannot be used as a `Location` header.
pub async fn redirect_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let target = state.shortener.get(&id).await?;

    let location = Url::parse(&target)
        .ok()
        .and_then(|_| HeaderValue::from_str(&target).ok())
        .ok_or_else(|| {
            error!("Couldn't redirect to {}", target);
            AppError::internal("Stored URL is not redirectable", json!({ "id": id }))
        })?;

    info!("Redirect from {} to {}", id, target);

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response())
}
