//! Handler for the JSON link shortening endpoint.

use axum::{Json, extract::State, http::HeaderMap};
use std::time::Duration;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::application::services::PostOptions;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::host::short_url;

/// Creates a short link for one URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "example.com/page", "ttl_seconds": 3600, "length": 10 }
/// ```
///
/// `ttl_seconds` and `length` are optional and fall back to the configured
/// defaults.
///
/// # Response
///
/// ```json
/// {
///   "id": "3f1c9a0b7e",
///   "url": "http://example.com/page",
///   "short_url": "sho.rt/r/3f1c9a0b7e",
///   "expires_at": "2024-05-01T13:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails or the URL does not parse.
/// Returns 500 Internal Server Error on storage faults.
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let mut options = PostOptions::default();
    if let Some(secs) = payload.ttl_seconds {
        options = options.with_ttl(Duration::from_secs(secs));
    }
    if let Some(length) = payload.length {
        options = options.with_length(length);
    }

    let link = state.shortener.post_link(&payload.url, options).await?;

    Ok(Json(ShortenResponse {
        short_url: short_url(&headers, &link.id),
        id: link.id,
        url: link.url,
        expires_at: link.expires_at,
    }))
}
