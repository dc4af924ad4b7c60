//! Authentication error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Failed to read key file {path}: {message}")]
    KeyFile { path: String, message: String },

    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    #[error("Failed to sign JWT assertion: {0}")]
    Signing(String),

    #[error("Token exchange failed with status {status}: {body}")]
    TokenExchange { status: u16, body: String },

    #[error("Invalid token response: {0}")]
    InvalidTokenResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl AuthError {
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::KeyFile { .. } => "Service account key file could not be read.",
            AuthError::InvalidKey(_) => "Service account key is invalid.",
            AuthError::Signing(_) => "Failed to sign the authentication request.",
            AuthError::TokenExchange { .. } => "Google rejected the service account credentials.",
            AuthError::InvalidTokenResponse(_) => "Received an unexpected token response.",
            AuthError::Network(_) => "Network error. Check your connection.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_exchange_display_includes_status() {
        let err = AuthError::TokenExchange {
            status: 400,
            body: r#"{"error":"invalid_grant"}"#.into(),
        };
        assert!(err.to_string().contains("400"));
        assert!(err.to_string().contains("invalid_grant"));
        assert!(err.user_message().contains("rejected"));
    }
}
