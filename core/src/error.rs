//! Error types for the Docsvault API client.
//!
//! # Design
//! Every failure falls into one of two kinds. Transport errors mean the HTTP
//! exchange itself did not produce a 200: either the server answered with
//! another status or the request never completed. Application errors mean
//! HTTP succeeded but the envelope did not deliver what the operation
//! promised: the server reported a failure, an expected field was absent, or
//! the body was not a Docsvault envelope at all. `ApiError::kind` exposes the
//! split so callers can own their retry policy.

use thiserror::Error;

/// Result alias used throughout the client.
pub type Result<T> = std::result::Result<T, ApiError>;

/// The two error families a call can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Application,
}

/// Errors returned by `DocsvaultClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a status other than 200.
    #[error("{operation} request failed with status code: {status}")]
    Http { operation: String, status: u16 },

    /// The request could not be sent or the response could not be read.
    #[error("{operation} request could not be completed: {reason}")]
    Network { operation: String, reason: String },

    /// The envelope carried the failure status. `message` is the server's
    /// text verbatim.
    #[error("{label} {message}")]
    Rejected { label: String, message: String },

    /// The envelope reported success but lacked a field the operation needs.
    #[error("{label} {field} not found in API response.")]
    MissingField { label: String, field: String },

    /// The body was not a well-formed Docsvault envelope.
    #[error("{label} Malformed API response: {reason}")]
    Malformed { label: String, reason: String },
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Http { .. } | ApiError::Network { .. } => ErrorKind::Transport,
            ApiError::Rejected { .. } | ApiError::MissingField { .. } | ApiError::Malformed { .. } => {
                ErrorKind::Application
            }
        }
    }

    /// HTTP status for `Http` errors, `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_message_is_prefixed_with_label() {
        let err = ApiError::Rejected {
            label: "Login failed.".to_string(),
            message: "bad creds".to_string(),
        };
        assert_eq!(err.to_string(), "Login failed. bad creds");
        assert_eq!(err.kind(), ErrorKind::Application);
        assert_eq!(err.status(), None);
    }

    #[test]
    fn missing_field_reads_like_a_sentence() {
        let err = ApiError::MissingField {
            label: "Login failed.".to_string(),
            field: "Token ID".to_string(),
        };
        assert_eq!(err.to_string(), "Login failed. Token ID not found in API response.");
        assert_eq!(err.kind(), ErrorKind::Application);
    }

    #[test]
    fn http_error_is_transport_kind() {
        let err = ApiError::Http {
            operation: "Logout".to_string(),
            status: 503,
        };
        assert_eq!(err.to_string(), "Logout request failed with status code: 503");
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn network_error_is_transport_kind() {
        let err = ApiError::Network {
            operation: "Login".to_string(),
            reason: "connection refused".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.status(), None);
    }
}
