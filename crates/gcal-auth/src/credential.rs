//! Service account credential value.

use std::fmt;
use std::path::PathBuf;

use crate::error::AuthError;

/// Full read/write access to calendars.
pub const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar";

/// Where the account's private key comes from.
#[derive(Clone, PartialEq, Eq)]
pub enum KeyMaterial {
    /// Path to a PEM file on disk
    File(PathBuf),
    /// PEM text held in memory
    Raw(String),
}

impl KeyMaterial {
    /// Load the PEM text, reading the file if needed.
    ///
    /// # Errors
    /// Returns [`AuthError::KeyFile`] when the file can't be read.
    pub async fn read_pem(&self) -> Result<String, AuthError> {
        match self {
            KeyMaterial::Raw(pem) => Ok(pem.clone()),
            KeyMaterial::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| AuthError::KeyFile {
                        path: path.display().to_string(),
                        message: e.to_string(),
                    })
            }
        }
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyMaterial::File(path) => f.debug_tuple("File").field(path).finish(),
            KeyMaterial::Raw(_) => f.write_str("Raw(<redacted>)"),
        }
    }
}

/// Identity used for every request a client makes.
///
/// Built once and shared read-only between all resource wrappers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub account_email: String,
    pub key_material: KeyMaterial,
    pub scopes: Vec<String>,
}

impl Credential {
    pub fn new(account_email: impl Into<String>, key_material: KeyMaterial) -> Self {
        Self {
            account_email: account_email.into(),
            key_material,
            scopes: vec![CALENDAR_SCOPE.to_string()],
        }
    }

    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Space-separated scope string for the `scope` claim.
    pub fn scope_string(&self) -> String {
        self.scopes.join(" ")
    }

    /// Key used to cache tokens issued for this identity.
    pub(crate) fn cache_key(&self) -> String {
        format!("{}|{}", self.account_email, self.scope_string())
    }
}
