//! Configuration error types.
//!
//! These are the only errors raised while constructing a client. Everything
//! after construction reports failure through the per-call error type of the
//! calendar crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),

    #[error("Missing required setting: {0}")]
    MissingSetting(String),

    #[error("Missing key material for service account {0}; set exactly one of key_file or key")]
    MissingKey(String),

    #[error("Ambiguous key material for service account {0}; set only one of key_file or key")]
    AmbiguousKey(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NotFound(_) => "Configuration not found. Create a config file first.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
            ConfigError::MissingSetting(_) => "A required setting is missing. Check your settings.",
            ConfigError::MissingKey(_) => {
                "No service account key configured. Set a key file or a raw key."
            }
            ConfigError::AmbiguousKey(_) => {
                "Both a key file and a raw key are configured. Keep only one."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_mentions_account() {
        let err = ConfigError::MissingKey("svc@example.iam.gserviceaccount.com".into());
        assert!(err.to_string().contains("svc@example.iam.gserviceaccount.com"));
        assert!(err.user_message().contains("key"));
    }

    #[test]
    fn test_user_messages_are_non_empty() {
        let errors = [
            ConfigError::NotFound("x".into()),
            ConfigError::Invalid("x".into()),
            ConfigError::ParseError("x".into()),
            ConfigError::MissingSetting("x".into()),
            ConfigError::MissingKey("x".into()),
            ConfigError::AmbiguousKey("x".into()),
        ];

        for err in &errors {
            assert!(!err.user_message().is_empty());
        }
    }
}
