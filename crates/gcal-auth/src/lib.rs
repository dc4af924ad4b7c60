//! Service-account authentication for the Google Calendar API.
//!
//! Signs JWT assertions with the account's private key, exchanges them for
//! OAuth2 access tokens and caches those tokens until shortly before expiry.

pub mod credential;
pub mod error;
pub mod service_account;
pub mod token;

pub use credential::{Credential, KeyMaterial, CALENDAR_SCOPE};
pub use error::AuthError;
pub use service_account::{Claims, ServiceAccountTokenSource, GOOGLE_TOKEN_URL};
pub use token::{AccessToken, StaticTokenSource, TokenSource};
