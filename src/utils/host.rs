//! Public short URL construction from request headers.

use axum::http::{HeaderMap, header};

/// Path prefix under which short links are served.
pub const REDIRECT_PREFIX: &str = "r";

/// Builds the user-facing short URL `{host}/r/{id}` for the current request.
///
/// The `Host` header is used verbatim, port included. Without a usable
/// header the result is the host-relative `r/{id}`.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "sho.rt:8080".parse().unwrap());
/// assert_eq!(short_url(&headers, "abc"), "sho.rt:8080/r/abc");
/// ```
pub fn short_url(headers: &HeaderMap, id: &str) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|h| !h.is_empty());

    match host {
        Some(host) => format!("{}/{}/{}", host, REDIRECT_PREFIX, id),
        None => format!("{}/{}", REDIRECT_PREFIX, id),
    }
}
