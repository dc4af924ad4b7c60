use async_trait::async_trait;

use crate::credential::Credential;
use crate::error::AuthError;

/// Seconds before expiry at which a cached token is considered stale.
const REFRESH_BUFFER_SECS: i64 = 300;

/// Bearer token issued for a credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,

    /// Expiration timestamp (Unix timestamp)
    pub expires_at: i64,
}

impl AccessToken {
    pub fn new(token: impl Into<String>, expires_at: i64) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }

    /// Check if the token needs refresh (within 5 minutes of expiry)
    pub fn needs_refresh(&self) -> bool {
        let now = chrono::Utc::now().timestamp();
        now >= self.expires_at - REFRESH_BUFFER_SECS
    }

    /// Check if the token is expired
    pub fn is_expired(&self) -> bool {
        let now = chrono::Utc::now().timestamp();
        now >= self.expires_at
    }
}

/// Supplies bearer tokens for a credential.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// # Errors
    /// Returns an [`AuthError`] when no token can be produced.
    async fn token(&self, credential: &Credential) -> Result<AccessToken, AuthError>;
}

/// Hands out one pre-obtained token regardless of credential.
#[derive(Debug, Clone)]
pub struct StaticTokenSource {
    token: String,
}

impl StaticTokenSource {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenSource for StaticTokenSource {
    async fn token(&self, _credential: &Credential) -> Result<AccessToken, AuthError> {
        Ok(AccessToken::new(self.token.clone(), i64::MAX))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use crate::credential::KeyMaterial;

    #[test]
    fn test_needs_refresh_inside_buffer() {
        let now = chrono::Utc::now().timestamp();
        let token = AccessToken::new("t", now + 60);
        assert!(token.needs_refresh());
        assert!(!token.is_expired());
    }

    #[test]
    fn test_fresh_token() {
        let now = chrono::Utc::now().timestamp();
        let token = AccessToken::new("t", now + 3600);
        assert!(!token.needs_refresh());
    }

    #[test]
    fn test_expired_token() {
        let now = chrono::Utc::now().timestamp();
        let token = AccessToken::new("t", now - 1);
        assert!(token.is_expired());
        assert!(token.needs_refresh());
    }

    #[tokio::test]
    async fn test_static_source_returns_token() {
        let source = StaticTokenSource::new("abc");
        let cred = Credential::new("svc@x.com", KeyMaterial::Raw("pem".into()));
        let token = source.token(&cred).await.unwrap();
        assert_eq!(token.token, "abc");
        assert!(!token.needs_refresh());
    }
}
