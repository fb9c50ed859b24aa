//! Caller identity extraction from request headers.
//!
//! The only inbound identity signal is a plain `x-user-id` header carrying a
//! decimal integer. Absence of the header is a valid outcome (anonymous
//! caller); so is any value that does not parse as an integer. Extraction
//! never fails a request.

use axum::http::HeaderMap;
use serde::Serialize;

/// Header carrying the caller's numeric user id.
pub const IDENTITY_HEADER: &str = "x-user-id";

/// Identity of the caller that issued a request. Constructed fresh per
/// request and discarded when the request completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CallerIdentity {
    pub id: i64,
}

/// Derive the caller identity from request headers.
///
/// Returns `None` for a missing header, a non-UTF-8 value, or a value that
/// is not a decimal integer. Leading/trailing whitespace is tolerated.
/// Pure function of the header map.
pub fn extract_identity(headers: &HeaderMap) -> Option<CallerIdentity> {
    let raw = headers.get(IDENTITY_HEADER)?.to_str().ok()?;
    let id = raw.trim().parse::<i64>().ok()?;
    Some(CallerIdentity { id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(IDENTITY_HEADER, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn numeric_header_yields_identity() {
        let identity = extract_identity(&headers_with("42"));
        assert_eq!(identity, Some(CallerIdentity { id: 42 }));
    }

    #[test]
    fn missing_header_yields_none() {
        assert_eq!(extract_identity(&HeaderMap::new()), None);
    }

    #[test]
    fn non_numeric_header_is_anonymous() {
        // Pinned behavior: malformed values degrade to an anonymous caller
        // rather than failing the request.
        assert_eq!(extract_identity(&headers_with("abc")), None);
        assert_eq!(extract_identity(&headers_with("42abc")), None);
        assert_eq!(extract_identity(&headers_with("")), None);
        assert_eq!(extract_identity(&headers_with("4.2")), None);
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        assert_eq!(extract_identity(&headers_with(" 42 ")), Some(CallerIdentity { id: 42 }));
    }

    #[test]
    fn negative_ids_parse() {
        assert_eq!(extract_identity(&headers_with("-7")), Some(CallerIdentity { id: -7 }));
    }

    #[test]
    fn extraction_is_idempotent() {
        let headers = headers_with("42");
        let first = extract_identity(&headers);
        for _ in 0..5 {
            assert_eq!(extract_identity(&headers), first);
        }
    }
}
