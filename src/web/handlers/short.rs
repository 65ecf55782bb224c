//! Form submission handler that creates a link and renders it.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, http::HeaderMap};
use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::application::services::PostOptions;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::host::short_url;

/// Form body posted by the submission page.
#[derive(Debug, Deserialize)]
pub struct ShortenForm {
    pub u: Option<String>,
}

/// Confirmation page for a created link.
///
/// Renders `templates/short.html` with:
/// - The short URL as `{host}/r/{id}`
/// - The URL as submitted
/// - The normalized URL the link redirects to, linked only for `http(s)` targets
#[derive(Template, WebTemplate)]
#[template(path = "short.html")]
pub struct ShortTemplate {
    pub id: String,
    pub short_url: String,
    pub prev_url: String,
    pub prev_url_link: String,
    pub prev_url_linkable: bool,
}

/// Creates a short link from the `u` form field.
///
/// # Endpoint
///
/// `POST /`
///
/// # Errors
///
/// Returns 400 Bad Request if `u` is missing, blank or not a URL.
/// Returns 500 Internal Server Error on storage faults.
pub async fn short_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ShortenForm>,
) -> Result<ShortTemplate, AppError> {
    let submitted = form
        .u
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::bad_request("Missing form field `u`", json!({})))?;

    let link = state
        .shortener
        .post_link(&submitted, PostOptions::default())
        .await?;

    Ok(ShortTemplate {
        short_url: short_url(&headers, &link.id),
        id: link.id,
        prev_url: submitted,
        prev_url_linkable: is_web_url(&link.url),
        prev_url_link: link.url,
    })
}

/// Whether `url` is safe to render as a clickable `href`.
fn is_web_url(url: &str) -> bool {
    Url::parse(url).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
}
