//! Error types for Disk API calls.
//!
//! # Error Handling
//!
//! Every client operation returns `Result<T, DiskError>`:
//!
//! - [`DiskError::Transport`]: the request never produced a response
//! - [`DiskError::NotAuthorized`]: the server answered 401 or 403
//! - [`DiskError::Api`]: the server answered with any other non-2xx status
//! - [`DiskError::InvalidArgument`]: a required argument was blank; nothing was sent
//! - [`DiskError::Decode`]: a successful response did not fit the expected shape
//! - [`DiskError::Cancelled`]: the cancellation token fired
//!
//! # Example
//!
//! ```rust,ignore
//! use disk_api::DiskError;
//!
//! match api.meta_info().get_disk_info(&cancel).await {
//!     Ok(disk) => println!("{} bytes used", disk.used_space),
//!     Err(DiskError::NotAuthorized(e)) => println!("Check the token: {e}"),
//!     Err(e) => println!("Failed: {e}"),
//! }
//! ```

use std::fmt;

use bytes::Bytes;
use thiserror::Error;

use crate::protocol::ErrorDescription;
use crate::serialization::{decode_body, DecodeError};

/// A failure below the HTTP layer: connectivity, timeouts, local I/O.
#[derive(Debug, Error)]
pub enum TransportError {
    /// An error reported by the HTTP client.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// A local I/O error, for example while reading an upload stream.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The request was cancelled before a response arrived.
    #[error("Request was cancelled")]
    Cancelled,

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// A non-2xx response from the Disk API.
///
/// The structured `error` is parsed from the response body on a best-effort
/// basis and is `None` when the body is empty or malformed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiError {
    /// The HTTP status code.
    pub status: u16,
    /// The HTTP reason phrase.
    pub reason: Option<String>,
    /// The server's error description, if the body carried one.
    pub error: Option<ErrorDescription>,
}

impl ApiError {
    /// Builds an error from a response, parsing the body best-effort.
    #[must_use]
    pub fn from_response(status: u16, reason: Option<String>, body: &Bytes) -> Self {
        let error = match decode_body::<ErrorDescription>(status, body.clone()) {
            Ok(error) => error,
            Err(e) => {
                tracing::debug!(status, error = %e, "Ignoring malformed error body");
                None
            }
        };
        Self {
            status,
            reason,
            error,
        }
    }

    /// Returns the server's error code, such as `unauthorized`.
    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.error.as_str())
    }

    /// Returns `true` for 401 and 403.
    #[must_use]
    pub const fn is_not_authorized(&self) -> bool {
        matches!(self.status, 401 | 403)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StatusCode: {}", self.status)?;
        if let Some(reason) = &self.reason {
            write!(f, ", {reason}")?;
        }
        if let Some(description) = self
            .error
            .as_ref()
            .map(|e| e.description.as_str())
            .filter(|d| !d.is_empty())
        {
            write!(f, ". {description}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Unified error type for Disk API operations.
#[derive(Debug, Error)]
pub enum DiskError {
    /// The request could not be completed at the transport level.
    #[error(transparent)]
    Transport(TransportError),

    /// The server rejected the credentials (401 or 403).
    #[error("Not authorized. {0}")]
    NotAuthorized(ApiError),

    /// The server returned a non-2xx status.
    #[error("API error. {0}")]
    Api(ApiError),

    /// A required argument was missing or blank.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// The argument name.
        name: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// A successful response could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A request body could not be serialized.
    #[error("Failed to serialize request body: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A local file operation failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The operation was cancelled.
    #[error("Operation was cancelled")]
    Cancelled,
}

impl DiskError {
    /// Creates an [`DiskError::InvalidArgument`].
    #[must_use]
    pub fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// Classifies a non-2xx response.
    #[must_use]
    pub fn from_status(status: u16, reason: Option<String>, body: &Bytes) -> Self {
        let error = ApiError::from_response(status, reason, body);
        if error.is_not_authorized() {
            Self::NotAuthorized(error)
        } else {
            Self::Api(error)
        }
    }

    /// Returns the API error for both [`DiskError::Api`] and
    /// [`DiskError::NotAuthorized`].
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(error) | Self::NotAuthorized(error) => Some(error),
            _ => None,
        }
    }

    /// Returns `true` if this error is a cancellation.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Transport(TransportError::Cancelled))
    }
}

impl From<TransportError> for DiskError {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::Cancelled => Self::Cancelled,
            other => Self::Transport(other),
        }
    }
}

/// Fails with [`DiskError::InvalidArgument`] when `value` is blank.
pub(crate) fn ensure_not_blank(name: &'static str, value: &str) -> Result<(), DiskError> {
    if value.trim().is_empty() {
        return Err(DiskError::invalid_argument(name, "must not be blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_401_is_not_authorized_with_description() {
        let body = Bytes::from_static(br#"{"error":"unauthorized","description":"bad token"}"#);
        let error = DiskError::from_status(401, Some("Unauthorized".to_string()), &body);

        let DiskError::NotAuthorized(api) = &error else {
            panic!("expected NotAuthorized, got {error:?}");
        };
        assert_eq!(api.error_code(), Some("unauthorized"));
        assert_eq!(
            error.to_string(),
            "Not authorized. StatusCode: 401, Unauthorized. bad token"
        );
    }

    #[test]
    fn test_403_is_not_authorized() {
        let error = DiskError::from_status(403, None, &Bytes::new());
        assert!(matches!(error, DiskError::NotAuthorized(_)));
    }

    #[test]
    fn test_other_status_is_api_error() {
        let body = Bytes::from_static(br#"{"error":"DiskNotFoundError","description":"Resource not found."}"#);
        let error = DiskError::from_status(404, Some("Not Found".to_string()), &body);

        assert!(matches!(error, DiskError::Api(_)));
        assert_eq!(error.api_error().unwrap().status, 404);
        assert_eq!(error.api_error().unwrap().error_code(), Some("DiskNotFoundError"));
    }

    #[test]
    fn test_malformed_error_body_is_swallowed() {
        let body = Bytes::from_static(b"<html>Bad Gateway</html>");
        let error = DiskError::from_status(502, Some("Bad Gateway".to_string()), &body);

        let api = error.api_error().unwrap();
        assert!(api.error.is_none());
        assert_eq!(api.to_string(), "StatusCode: 502, Bad Gateway");
    }

    #[test]
    fn test_transport_cancellation_maps_to_cancelled() {
        let error: DiskError = TransportError::Cancelled.into();
        assert!(matches!(error, DiskError::Cancelled));
        assert!(error.is_cancelled());
    }

    #[test]
    fn test_transport_message_is_unchanged() {
        let error: DiskError = TransportError::Other("connection reset".to_string()).into();
        assert_eq!(error.to_string(), "connection reset");
    }

    #[test]
    fn test_ensure_not_blank() {
        assert!(ensure_not_blank("path", "/foo").is_ok());
        assert!(matches!(
            ensure_not_blank("path", "  "),
            Err(DiskError::InvalidArgument { name: "path", .. })
        ));
    }
}
