//! Calendar call error types.
//!
//! Every wrapper operation fails with a [`NormalizedError`]: the operation
//! name (`origin`, e.g. `"Events.get"`) plus a typed [`ErrorDetail`].

use serde_json::{json, Value};
use thiserror::Error;

/// Failure of the underlying HTTP/auth transport.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Failed to read response body: {0}")]
    Body(String),
}

impl TransportError {
    /// Transport-defined message, passed through untouched.
    pub fn message(&self) -> &str {
        match self {
            Self::Auth(msg) | Self::Request(msg) | Self::Body(msg) => msg,
        }
    }
}

impl From<gcal_auth::AuthError> for TransportError {
    fn from(err: gcal_auth::AuthError) -> Self {
        Self::Auth(err.to_string())
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(err.to_string())
    }
}

/// Failure of a [`RestClient`](crate::rest::RestClient) primitive.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RestError {
    #[error("Missing argument; {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Request cancelled")]
    Cancelled,
}

/// Response whose status code differed from the one the operation expects.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteStatus {
    pub status_code: u16,
    pub status_message: Option<String>,
    pub body: Value,
}

impl RemoteStatus {
    /// `"404(Not Found)"`, or just `"404"` without a reason phrase.
    pub fn status_line(&self) -> String {
        match self.status_message.as_deref() {
            Some(msg) if !msg.is_empty() => format!("{}({})", self.status_code, msg),
            _ => self.status_code.to_string(),
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "statusCode": self.status_line(),
            "errorBody": self.body,
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorDetail {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Unexpected status {}", .0.status_line())]
    RemoteStatus(RemoteStatus),

    #[error(transparent)]
    Transport(TransportError),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Invalid JSON in response body: {0}")]
    InvalidBody(String),

    #[error("Unexpected response body: {0}")]
    UnexpectedBody(String),
}

impl From<RestError> for ErrorDetail {
    fn from(err: RestError) -> Self {
        match err {
            RestError::InvalidArgument(_) => Self::InvalidArgument(err.to_string()),
            RestError::Transport(e) => Self::Transport(e),
            RestError::Cancelled => Self::Cancelled,
        }
    }
}

impl ErrorDetail {
    /// Wire rendering: JSON when the failure carries JSON, the message otherwise.
    pub fn to_json(&self) -> Value {
        match self {
            Self::RemoteStatus(status) => status.to_json(),
            Self::Transport(e) => try_parse_json(e.message()),
            other => Value::String(other.to_string()),
        }
    }
}

/// Error returned by every resource wrapper operation.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{origin}: {error}")]
pub struct NormalizedError {
    pub origin: String,
    #[source]
    pub error: ErrorDetail,
}

impl NormalizedError {
    pub fn new(origin: impl Into<String>, error: ErrorDetail) -> Self {
        Self {
            origin: origin.into(),
            error,
        }
    }

    pub fn validation(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(origin, ErrorDetail::Validation(message.into()))
    }

    /// `{ "origin": ..., "error": ... }`
    pub fn to_json(&self) -> Value {
        json!({
            "origin": self.origin,
            "error": self.error.to_json(),
        })
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self.error,
            ErrorDetail::Validation(_) | ErrorDetail::InvalidArgument(_)
        )
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.error, ErrorDetail::Cancelled)
    }

    /// Status code of a remote status mismatch.
    pub fn status_code(&self) -> Option<u16> {
        match &self.error {
            ErrorDetail::RemoteStatus(status) => Some(status.status_code),
            _ => None,
        }
    }

    /// User-friendly error message for UI display.
    pub fn user_message(&self) -> String {
        match &self.error {
            ErrorDetail::Validation(msg) | ErrorDetail::InvalidArgument(msg) => {
                format!("Invalid request: {}", msg)
            }
            ErrorDetail::RemoteStatus(status) => match status.status_code {
                401 | 403 => "Calendar access was denied for the service account.".to_string(),
                404 => "Calendar resource not found.".to_string(),
                429 => "Too many requests. Please wait and try again.".to_string(),
                code if code >= 500 => {
                    "Google Calendar is experiencing issues. Please try again later.".to_string()
                }
                _ => format!("Calendar request failed ({}).", status.status_line()),
            },
            ErrorDetail::Transport(TransportError::Auth(_)) => {
                "Could not authenticate the service account.".to_string()
            }
            ErrorDetail::Transport(_) => "Network error. Check your connection.".to_string(),
            ErrorDetail::Cancelled => "The request was cancelled.".to_string(),
            ErrorDetail::InvalidBody(_) | ErrorDetail::UnexpectedBody(_) => {
                "Received an unexpected response from Google Calendar.".to_string()
            }
        }
    }
}

/// Parse `text` as JSON, falling back to the string itself.
pub fn try_parse_json(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    fn not_found() -> NormalizedError {
        NormalizedError::new(
            "Events.get",
            ErrorDetail::RemoteStatus(RemoteStatus {
                status_code: 404,
                status_message: Some("Not Found".into()),
                body: json!({"error": {"code": 404, "message": "Not Found"}}),
            }),
        )
    }

    #[test]
    fn test_status_line_with_and_without_message() {
        let mut status = RemoteStatus {
            status_code: 404,
            status_message: Some("Not Found".into()),
            body: Value::Null,
        };
        assert_eq!(status.status_line(), "404(Not Found)");

        status.status_message = Some(String::new());
        assert_eq!(status.status_line(), "404");

        status.status_message = None;
        assert_eq!(status.status_line(), "404");
    }

    #[test]
    fn test_remote_status_wire_shape() {
        let json = not_found().to_json();
        assert_eq!(json["origin"], "Events.get");
        assert!(json["error"]["statusCode"].as_str().unwrap().starts_with("404"));
        assert_eq!(json["error"]["errorBody"]["error"]["code"], 404);
    }

    #[test]
    fn test_validation_wire_shape_is_string() {
        let err = NormalizedError::validation("Events.list", "Missing calendarId argument");
        assert_eq!(
            err.to_json(),
            json!({"origin": "Events.list", "error": "Missing calendarId argument"})
        );
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Events.list: Missing calendarId argument");
    }

    #[test]
    fn test_transport_message_parsed_when_json() {
        let err = NormalizedError::new(
            "Colors.get",
            ErrorDetail::Transport(TransportError::Request(r#"{"code":"ECONNRESET"}"#.into())),
        );
        assert_eq!(err.to_json()["error"]["code"], "ECONNRESET");

        let err = NormalizedError::new(
            "Colors.get",
            ErrorDetail::Transport(TransportError::Request("connection reset".into())),
        );
        assert_eq!(err.to_json()["error"], "connection reset");
    }

    #[test]
    fn test_rest_error_conversion() {
        let detail: ErrorDetail = RestError::InvalidArgument("request url needed".into()).into();
        assert_eq!(
            detail,
            ErrorDetail::InvalidArgument("Missing argument; request url needed".into())
        );

        let detail: ErrorDetail = RestError::Cancelled.into();
        assert_eq!(detail, ErrorDetail::Cancelled);
    }

    #[test]
    fn test_helpers() {
        let err = not_found();
        assert_eq!(err.status_code(), Some(404));
        assert!(!err.is_validation());
        assert!(!err.is_cancelled());
        assert!(err.user_message().contains("not found"));

        let err = NormalizedError::new("Events.list", ErrorDetail::Cancelled);
        assert!(err.is_cancelled());
        assert_eq!(err.status_code(), None);
    }
}
