//! Google service-account token flow (RFC 7523 JWT bearer grant).

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::credential::Credential;
use crate::error::AuthError;
use crate::token::{AccessToken, TokenSource};

pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime of a signed assertion; Google caps this at one hour.
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Claim set of the signed assertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(credential: &Credential, audience: &str, issued_at: i64) -> Self {
        Self {
            iss: credential.account_email.clone(),
            scope: credential.scope_string(),
            aud: audience.to_string(),
            iat: issued_at,
            exp: issued_at + ASSERTION_LIFETIME_SECS,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    ASSERTION_LIFETIME_SECS
}

/// Exchanges signed assertions for access tokens and caches the results.
pub struct ServiceAccountTokenSource {
    http: reqwest::Client,
    token_url: String,
    cache: Mutex<HashMap<String, AccessToken>>,
    refreshing: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl Default for ServiceAccountTokenSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceAccountTokenSource {
    pub fn new() -> Self {
        Self::with_token_url(GOOGLE_TOKEN_URL)
    }

    pub fn with_token_url(token_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            token_url: token_url.to_string(),
            cache: Mutex::new(HashMap::new()),
            refreshing: Mutex::new(HashMap::new()),
        }
    }

    /// Sign a JWT assertion for `credential` with RS256.
    ///
    /// # Errors
    /// Fails when the key can't be read or isn't a valid RSA PEM key.
    pub async fn sign_assertion(
        &self,
        credential: &Credential,
        issued_at: i64,
    ) -> Result<String, AuthError> {
        let pem = credential.key_material.read_pem().await?;
        let key = EncodingKey::from_rsa_pem(pem.as_bytes())
            .map_err(|e| AuthError::InvalidKey(e.to_string()))?;
        let claims = Claims::new(credential, &self.token_url, issued_at);

        encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    fn cached(&self, key: &str) -> Option<AccessToken> {
        self.cache
            .lock()
            .get(key)
            .filter(|token| !token.needs_refresh())
            .cloned()
    }

    /// Per-account lock held for the duration of one exchange.
    fn refresh_lock(&self, key: &str) -> Arc<tokio::sync::Mutex<()>> {
        Arc::clone(self.refreshing.lock().entry(key.to_string()).or_default())
    }

    #[tracing::instrument(skip(self, credential), fields(account = %credential.account_email), level = "info")]
    async fn exchange(&self, credential: &Credential) -> Result<AccessToken, AuthError> {
        let now = chrono::Utc::now().timestamp();
        let assertion = self.sign_assertion(credential, now).await?;

        let response = self
            .http
            .post(&self.token_url)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::TokenExchange {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::InvalidTokenResponse(e.to_string()))?;

        tracing::info!("Obtained access token, expires in {}s", parsed.expires_in);
        Ok(AccessToken::new(parsed.access_token, now + parsed.expires_in))
    }
}

#[async_trait]
impl TokenSource for ServiceAccountTokenSource {
    async fn token(&self, credential: &Credential) -> Result<AccessToken, AuthError> {
        let key = credential.cache_key();
        if let Some(token) = self.cached(&key) {
            return Ok(token);
        }

        let lock = self.refresh_lock(&key);
        let _guard = lock.lock().await;
        // Another caller may have refreshed while this one waited.
        if let Some(token) = self.cached(&key) {
            return Ok(token);
        }

        let token = self.exchange(credential).await?;
        self.cache.lock().insert(key, token.clone());
        Ok(token)
    }
}
