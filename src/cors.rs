//! Cross-origin response headers.
//!
//! Pure functions over the configured origin allowlist; applied by the
//! router to every response and by the forwarders when relaying upstream
//! responses.

use axum::http::header::{
    HeaderMap, HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE,
};

/// The origin value echoed on every response.
///
/// Every origin is currently permitted. The allowlist is threaded through
/// so restricting to configured origins is a change to this function alone.
#[must_use]
pub fn allowed_origin(_allowlist: &[String]) -> HeaderValue {
    HeaderValue::from_static("*")
}

/// The full CORS header set: origin, allowed methods and headers, and a
/// 24-hour preflight cache.
#[must_use]
pub fn cors_headers(allowlist: &[String]) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, allowed_origin(allowlist));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET,POST,OPTIONS"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type,Authorization,x-api-key,anthropic-version"),
    );
    headers.insert(ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static("86400"));
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_header_set() {
        let headers = cors_headers(&[]);

        assert_eq!(headers.len(), 4);
        assert_eq!(headers.get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
        assert_eq!(
            headers.get(ACCESS_CONTROL_ALLOW_METHODS).unwrap(),
            "GET,POST,OPTIONS"
        );
        assert_eq!(
            headers.get(ACCESS_CONTROL_ALLOW_HEADERS).unwrap(),
            "Content-Type,Authorization,x-api-key,anthropic-version"
        );
        assert_eq!(headers.get(ACCESS_CONTROL_MAX_AGE).unwrap(), "86400");
    }

    #[test]
    fn test_allowlist_does_not_narrow_origin() {
        let allowlist = vec!["https://app.example".to_string()];
        assert_eq!(allowed_origin(&allowlist), "*");
        assert_eq!(
            cors_headers(&allowlist)
                .get(ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
    }
}
