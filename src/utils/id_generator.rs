//! Short id derivation.
//!
//! An id is a prefix of the SHA-256 digest of the normalized URL joined with
//! the creation timestamp. Embedding the timestamp means the same URL
//! submitted twice gets two different ids.

use chrono::{DateTime, SecondsFormat, Utc};
use sha2::{Digest, Sha256};

/// Id length used when neither the request nor the configuration sets one.
pub const DEFAULT_LENGTH: usize = 8;

/// Length of a fully rendered SHA-256 digest in hex characters.
pub const DIGEST_HEX_LENGTH: usize = 64;

/// Separator between the URL and the timestamp in the hashed input.
const SEPARATOR: char = '-';

/// Derives an id of `length` lowercase hex characters.
///
/// Returns the whole 64-character digest when `length >= 64`. The result is
/// a pure function of its inputs; callers pass the clock reading.
///
/// # Examples
///
/// ```ignore
/// let id = generate_id("http://example.com", Utc::now(), 8);
/// assert_eq!(id.len(), 8);
/// ```
pub fn generate_id(url: &str, at: DateTime<Utc>, length: usize) -> String {
    let input = format!(
        "{}{}{}",
        url,
        SEPARATOR,
        at.to_rfc3339_opts(SecondsFormat::Nanos, true)
    );

    let mut id = hex::encode(Sha256::digest(input.as_bytes()));
    id.truncate(length.min(DIGEST_HEX_LENGTH));
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_generate_id_default_length() {
        let id = generate_id("http://example.com", fixed_time(), DEFAULT_LENGTH);
        assert_eq!(id.len(), 8);
    }

    #[test]
    fn test_generate_id_lowercase_hex() {
        let id = generate_id("http://example.com", fixed_time(), 64);
        assert!(
            id.chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }

    #[test]
    fn test_generate_id_every_length() {
        for n in 1..=DIGEST_HEX_LENGTH {
            assert_eq!(generate_id("http://example.com", fixed_time(), n).len(), n);
        }
    }

    #[test]
    fn test_generate_id_caps_at_digest_length() {
        let id = generate_id("http://example.com", fixed_time(), 200);
        assert_eq!(id.len(), DIGEST_HEX_LENGTH);
    }

    #[test]
    fn test_generate_id_is_prefix_of_full_digest() {
        let full = generate_id("http://example.com", fixed_time(), DIGEST_HEX_LENGTH);
        let short = generate_id("http://example.com", fixed_time(), 12);
        assert!(full.starts_with(&short));
    }

    #[test]
    fn test_generate_id_deterministic_for_fixed_inputs() {
        let a = generate_id("http://example.com", fixed_time(), 16);
        let b = generate_id("http://example.com", fixed_time(), 16);
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_id_matches_sha256_of_joined_input() {
        let expected = hex::encode(Sha256::digest(
            b"http://example.com-2024-05-01T12:00:00.000000000Z",
        ));
        assert_eq!(generate_id("http://example.com", fixed_time(), 64), expected);
    }

    #[test]
    fn test_generate_id_differs_across_timestamps() {
        let a = generate_id("http://example.com", fixed_time(), 8);
        let b = generate_id(
            "http://example.com",
            fixed_time() + Duration::nanoseconds(1),
            8,
        );
        assert_ne!(a, b);
    }

    #[test]
    fn test_generate_id_differs_across_urls() {
        let a = generate_id("http://example.com", fixed_time(), 8);
        let b = generate_id("http://example.org", fixed_time(), 8);
        assert_ne!(a, b);
    }
}
