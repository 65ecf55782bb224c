//! URL validation and scheme defaulting.
//!
//! Input that parses as an absolute URL is kept as the parser serializes it.
//! Input without a scheme (`example.com/page`) is reparsed with `http://`
//! in front, so the stored target redirects off-site instead of resolving
//! relative to the shortener's own host.

use std::borrow::Cow;
use url::{ParseError, Url};

/// Scheme applied to input that has none.
pub const DEFAULT_SCHEME: &str = "http";

/// Errors that can occur during URL normalization.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(#[from] ParseError),
}

/// Normalizes a URL to the form that is stored and redirected to.
///
/// # Normalization Rules
///
/// 1. **Scheme**: defaulted to `http` when absent
/// 2. **Scheme and host**: lowercased by the parser
/// 3. **Empty path**: left empty; the parser's implicit `/` is not added
/// 4. **Everything else**: preserved as parsed
///
/// # Errors
///
/// Returns [`UrlNormalizationError::InvalidFormat`] when the input is not a
/// URL even after the scheme is defaulted.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_url("example.com").unwrap(), "http://example.com");
/// assert_eq!(
///     normalize_url("HTTPS://EXAMPLE.COM/Path").unwrap(),
///     "https://example.com/Path"
/// );
/// ```
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let input = input.trim();

    let (candidate, url) = match Url::parse(input) {
        Ok(url) => (Cow::Borrowed(input), url),
        Err(ParseError::RelativeUrlWithoutBase) => {
            let candidate = format!("{}://{}", DEFAULT_SCHEME, input);
            let url = Url::parse(&candidate)?;
            (Cow::Owned(candidate), url)
        }
        Err(e) => return Err(e.into()),
    };

    let implicit_root = url.path() == "/"
        && url.query().is_none()
        && url.fragment().is_none()
        && !candidate.ends_with('/');

    let mut normalized = String::from(url);
    if implicit_root {
        normalized.pop();
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_defaults_missing_scheme() {
        assert_eq!(normalize_url("example.com").unwrap(), "http://example.com");
    }

    #[test]
    fn test_normalize_defaults_scheme_with_path() {
        assert_eq!(
            normalize_url("example.com/some/page?x=1").unwrap(),
            "http://example.com/some/page?x=1"
        );
    }

    #[test]
    fn test_normalize_keeps_existing_scheme() {
        assert_eq!(
            normalize_url("https://example.com/path").unwrap(),
            "https://example.com/path"
        );
    }

    #[test]
    fn test_normalize_no_implicit_root_slash() {
        assert_eq!(
            normalize_url("http://example.com").unwrap(),
            "http://example.com"
        );
    }

    #[test]
    fn test_normalize_keeps_explicit_root_slash() {
        assert_eq!(
            normalize_url("http://example.com/").unwrap(),
            "http://example.com/"
        );
    }

    #[test]
    fn test_normalize_lowercases_scheme_and_host() {
        assert_eq!(
            normalize_url("HTTPS://EXAMPLE.COM/Path").unwrap(),
            "https://example.com/Path"
        );
    }

    #[test]
    fn test_normalize_preserves_query_after_empty_path() {
        assert_eq!(
            normalize_url("http://example.com?q=rust").unwrap(),
            "http://example.com/?q=rust"
        );
    }

    #[test]
    fn test_normalize_accepts_non_http_schemes() {
        assert_eq!(
            normalize_url("ftp://files.example.com/pub").unwrap(),
            "ftp://files.example.com/pub"
        );
        assert_eq!(
            normalize_url("mailto:user@example.com").unwrap(),
            "mailto:user@example.com"
        );
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(
            normalize_url("  example.com  ").unwrap(),
            "http://example.com"
        );
    }

    #[test]
    fn test_normalize_rejects_spaces_in_host() {
        let result = normalize_url("not a url with spaces and://badscheme");
        assert!(matches!(
            result,
            Err(UrlNormalizationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_normalize_rejects_empty() {
        assert!(normalize_url("").is_err());
        assert!(normalize_url("   ").is_err());
    }

    #[test]
    fn test_normalize_rejects_missing_host() {
        assert!(normalize_url("http://").is_err());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in ["example.com", "https://a.example.com/x?y=z", "http://b.example/"] {
            let once = normalize_url(input).unwrap();
            assert_eq!(normalize_url(&once).unwrap(), once);
        }
    }
}
