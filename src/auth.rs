//! Session Authentication
//!
//! Members sign in with their email and, when configured, the team access
//! code. A successful login issues an opaque bearer token; API requests carry
//! it in the `Authorization` header.

use axum::http::{header, HeaderMap};
use chrono::Duration;

/// Session settings
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Shared access code; empty disables the check
    pub access_code: String,
    /// Lifetime of issued sessions
    pub session_ttl: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_code: String::new(),
            session_ttl: Duration::hours(24 * 7),
        }
    }
}

impl AuthConfig {
    /// Check a submitted access code against the configured one
    pub fn access_code_matches(&self, submitted: &str) -> bool {
        if self.access_code.is_empty() {
            return true;
        }

        // Compare every byte so timing does not leak the matching prefix
        let expected = self.access_code.as_bytes();
        let submitted = submitted.as_bytes();
        if expected.len() != submitted.len() {
            return false;
        }
        expected
            .iter()
            .zip(submitted)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

/// Extract the bearer token from request headers
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token(&headers("Bearer abc")), Some("abc"));
        assert_eq!(bearer_token(&headers("bearer   abc ")), Some("abc"));
        assert_eq!(bearer_token(&headers("Basic abc")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_access_code() {
        let open = AuthConfig::default();
        assert!(open.access_code_matches(""));
        assert!(open.access_code_matches("anything"));

        let locked = AuthConfig {
            access_code: "team-2024".to_string(),
            ..Default::default()
        };
        assert!(locked.access_code_matches("team-2024"));
        assert!(!locked.access_code_matches("team-2025"));
        assert!(!locked.access_code_matches(""));
    }
}
