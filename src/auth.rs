//! Authentication check
//!
//! A binary authenticated/unauthenticated gate, nothing more. With no token
//! configured the server runs in open (sandbox) mode; with a token, write
//! routes require `Authorization: Bearer <token>`, and reads too when
//! `protect_reads` is set.

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;

/// How requests are authenticated
#[derive(Debug, Clone)]
pub enum AuthMode {
    /// No authentication; local/sandbox deployments
    Open,
    /// Static bearer token
    Token(String),
}

/// Authentication policy for the API layer
#[derive(Debug, Clone)]
pub struct AuthPolicy {
    mode: AuthMode,
    protect_reads: bool,
}

impl AuthPolicy {
    pub fn new(mode: AuthMode, protect_reads: bool) -> Self {
        AuthPolicy { mode, protect_reads }
    }

    pub fn open() -> Self {
        AuthPolicy {
            mode: AuthMode::Open,
            protect_reads: false,
        }
    }

    /// Does this request carry valid credentials?
    fn authenticated(&self, headers: &HeaderMap) -> bool {
        match &self.mode {
            AuthMode::Open => true,
            AuthMode::Token(expected) => headers
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "))
                .map(|token| token == expected)
                .unwrap_or(false),
        }
    }

    /// May this request perform a write?
    pub fn allow_write(&self, headers: &HeaderMap) -> bool {
        self.authenticated(headers)
    }

    /// May this request perform a read?
    pub fn allow_read(&self, headers: &HeaderMap) -> bool {
        if self.protect_reads {
            self.authenticated(headers)
        } else {
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        headers
    }

    #[test]
    fn open_mode_allows_everything() {
        let policy = AuthPolicy::open();
        assert!(policy.allow_write(&HeaderMap::new()));
        assert!(policy.allow_read(&HeaderMap::new()));
    }

    #[test]
    fn token_mode_gates_writes() {
        let policy = AuthPolicy::new(AuthMode::Token("s3cret".to_string()), false);
        assert!(!policy.allow_write(&HeaderMap::new()));
        assert!(!policy.allow_write(&headers_with("wrong")));
        assert!(policy.allow_write(&headers_with("s3cret")));
        // Reads stay open unless protect_reads is set
        assert!(policy.allow_read(&HeaderMap::new()));
    }

    #[test]
    fn protected_reads_require_token() {
        let policy = AuthPolicy::new(AuthMode::Token("s3cret".to_string()), true);
        assert!(!policy.allow_read(&HeaderMap::new()));
        assert!(policy.allow_read(&headers_with("s3cret")));
    }
}
