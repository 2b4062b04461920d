//! Pure helper functions for authentication
//!
//! Stateless helpers for cookie handling and HTTP client construction.

use axum::http::HeaderMap;
use std::time::Duration;

use crate::config::Config;

// =============================================================================
// HTTP Client Builders
// =============================================================================

/// Create a reqwest client for identity provider requests using config timeouts
pub fn create_http_client(
    connect_timeout_secs: u64,
    request_timeout_secs: u64,
) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .timeout(Duration::from_secs(request_timeout_secs))
        .build()
}

/// Create a reqwest client for the form relay.
///
/// Only the connect phase is bounded; a submission waits as long as the
/// relay takes to answer.
pub fn create_relay_client(connect_timeout_secs: u64) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .build()
}

// =============================================================================
// Cookies
// =============================================================================

/// Extract a cookie value from headers
///
/// Handles multiple Cookie headers (some proxies fold/duplicate headers).
/// Uses `get_all` to collect all Cookie header values.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let prefix = format!("{}=", name);

    for header_value in headers.get_all("cookie") {
        if let Ok(cookie_str) = header_value.to_str() {
            if let Some(value) = cookie_str
                .split(';')
                .map(|c| c.trim())
                .find(|c| c.starts_with(&prefix))
                .and_then(|c| c.strip_prefix(&prefix))
            {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// Build the Set-Cookie value that removes the session cookie
pub fn clear_session_cookie(config: &Config) -> String {
    format!(
        "{}=; HttpOnly; Path=/; Max-Age=0; SameSite=Lax{}{}",
        config.session_cookie,
        config.cookie_domain_attr(),
        config.cookie_secure_flag()
    )
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_config;

    #[test]
    fn test_extract_cookie_finds_value() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "cookie",
            axum::http::HeaderValue::from_static("foo=bar; sb-access-token=abc123; baz=qux"),
        );

        let result = extract_cookie(&headers, "sb-access-token");
        assert_eq!(result, Some("abc123".to_string()));
    }

    #[test]
    fn test_extract_cookie_missing_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "cookie",
            axum::http::HeaderValue::from_static("foo=bar; baz=qux"),
        );

        assert_eq!(extract_cookie(&headers, "sb-access-token"), None);
    }

    #[test]
    fn test_extract_cookie_no_cookie_header() {
        let headers = HeaderMap::new();
        assert_eq!(extract_cookie(&headers, "sb-access-token"), None);
    }

    #[test]
    fn test_extract_cookie_prefix_is_not_a_match() {
        // "sb-access-token-old" must not satisfy a lookup for "sb-access-token"
        let mut headers = HeaderMap::new();
        headers.insert(
            "cookie",
            axum::http::HeaderValue::from_static("sb-access-token-old=stale"),
        );

        assert_eq!(extract_cookie(&headers, "sb-access-token"), None);
    }

    #[test]
    fn test_extract_cookie_multiple_headers() {
        // Some proxies send multiple Cookie headers instead of one combined header
        let mut headers = HeaderMap::new();
        headers.append("cookie", axum::http::HeaderValue::from_static("foo=bar"));
        headers.append(
            "cookie",
            axum::http::HeaderValue::from_static("sb-access-token=secret123; baz=qux"),
        );

        let result = extract_cookie(&headers, "sb-access-token");
        assert_eq!(result, Some("secret123".to_string()));
    }

    #[test]
    fn test_clear_session_cookie_development() {
        let config = test_config();
        assert_eq!(
            clear_session_cookie(&config),
            "sb-access-token=; HttpOnly; Path=/; Max-Age=0; SameSite=Lax"
        );
    }

    #[test]
    fn test_clear_session_cookie_production_domain() {
        let mut config = test_config();
        config.environment = crate::config::Environment::Production;
        config.cookie_domain = Some("example.com".to_string());

        let cookie = clear_session_cookie(&config);
        assert!(cookie.ends_with("; Domain=example.com; Secure"));
    }
}
