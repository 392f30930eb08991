//! Backend client error types.

use thiserror::Error;
use uni_core::errors::CoreError;
use uni_core::responses::ErrorBody;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received (connection refused, DNS, timeout).
    #[error("no response from server: {reason}")]
    Unreachable {
        reason: String,
        /// The request hit its deadline rather than failing to connect.
        timed_out: bool,
    },

    /// The backend answered with a non-success status.
    #[error("API error ({status}): {}", .body.message.as_deref().unwrap_or("no message"))]
    Status {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Parsed error body; empty when the body was not JSON.
        body: ErrorBody,
    },

    /// A success response could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// A local file could not be read for upload.
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),

    /// The request could not be built.
    #[error("request error: {0}")]
    Request(String),

    /// The local session could not be updated.
    #[error(transparent)]
    Session(#[from] uni_auth::AuthError),
}

impl ApiError {
    /// HTTP status, when a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }

    /// `message` of the backend error body, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } => body.message.as_deref().filter(|m| !m.is_empty()),
            _ => None,
        }
    }
}

/// Errors surfaced by an entity page. Messages are what the user sees; the
/// underlying cause stays attached as the error source.
#[derive(Debug, Error)]
pub enum PageError {
    /// Own list or parent list could not be fetched.
    #[error("failed to load data")]
    Load(#[source] ApiError),

    /// The form is incomplete or a value does not parse.
    #[error(transparent)]
    Form(#[from] CoreError),

    #[error("save failed")]
    Save(#[source] ApiError),

    #[error("delete failed, check for dependent records")]
    Delete(#[source] ApiError),

    /// `submit` was called with no form open.
    #[error("no form is open")]
    NoForm,
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_builder() {
            return Self::Request(error.to_string());
        }
        if error.is_decode() {
            return Self::Decode(error.to_string());
        }
        Self::Unreachable {
            timed_out: error.is_timeout(),
            reason: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_exposes_message() {
        let err = ApiError::Status {
            status: 400,
            body: ErrorBody {
                message: Some("bad format".into()),
                ..Default::default()
            },
        };
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.server_message(), Some("bad format"));
        assert_eq!(err.to_string(), "API error (400): bad format");
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn empty_message_is_treated_as_absent() {
        let err = ApiError::Status {
            status: 401,
            body: ErrorBody {
                message: Some(String::new()),
                ..Default::default()
            },
        };
        assert_eq!(err.server_message(), None);
        assert!(err.is_unauthorized());
    }
}
