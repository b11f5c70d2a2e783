//! Error types for the management API client.
//!
//! # Design
//! One enum covers every failure a call can produce, from configuration
//! through to the response status. Nothing is recovered internally: each
//! variant is returned to the immediate caller. A 404 is not special-cased
//! into its own variant because the status policy treats every rejected
//! status the same way; `is_not_found` answers the common question instead.

use std::error::Error as StdError;

use thiserror::Error;

/// Boxed cause carried by `ApiError::TransportError`.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Errors returned by `ManagementClient` and the resource handles.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required configuration key is absent or empty.
    #[error("config key '{key}' is missing")]
    MissingConfig { key: &'static str },

    /// The configuration bag is malformed: an unknown key, a mistyped value,
    /// or an environment value that does not parse.
    #[error("invalid configuration: {0}")]
    ConfigError(String),

    /// A call parameter failed validation; no request was sent.
    #[error("{0}")]
    ValidationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The HTTP exchange itself failed (DNS, connect, timeout, body read).
    /// Any `Transport` implementation can report its own cause here.
    #[error("transport error: {0}")]
    TransportError(#[source] BoxError),

    /// The broker answered with a status the client's policy rejects. The
    /// response body is discarded.
    #[error("HTTP request failed with status: '{status_line}'")]
    HttpError { status: u16, status_line: String },
}

impl From<ureq::Error> for ApiError {
    fn from(err: ureq::Error) -> Self {
        ApiError::TransportError(Box::new(err))
    }
}

impl ApiError {
    /// Wrap a network-level failure from any transport.
    pub fn transport(cause: impl Into<BoxError>) -> Self {
        ApiError::TransportError(cause.into())
    }

    pub(crate) fn missing_param(name: &str) -> Self {
        ApiError::ValidationError(format!("missing {name} parameter"))
    }

    pub(crate) fn http_status(status: u16) -> Self {
        let status_line = match ureq::http::StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
        {
            Some(reason) => format!("{status} {reason}"),
            None => status.to_string(),
        };
        ApiError::HttpError { status, status_line }
    }

    /// The HTTP status carried by an `HttpError`, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_includes_canonical_reason() {
        let err = ApiError::http_status(404);
        assert_eq!(err.to_string(), "HTTP request failed with status: '404 Not Found'");
        assert!(err.is_not_found());
    }

    #[test]
    fn http_status_without_known_reason() {
        let err = ApiError::http_status(599);
        assert!(matches!(err, ApiError::HttpError { status: 599, ref status_line } if status_line == "599"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn missing_param_message_names_parameter() {
        let err = ApiError::missing_param("vhost");
        assert_eq!(err.to_string(), "missing vhost parameter");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn transport_error_keeps_foreign_cause() {
        let cause = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "peer went away");
        let err = ApiError::transport(cause);
        assert_eq!(err.to_string(), "transport error: peer went away");
        let source = err.source().unwrap();
        let io = source.downcast_ref::<std::io::Error>().unwrap();
        assert_eq!(io.kind(), std::io::ErrorKind::ConnectionReset);
    }

    #[test]
    fn ureq_errors_convert_to_transport_error() {
        let err: ApiError = ureq::Error::ConnectionFailed.into();
        assert!(matches!(err, ApiError::TransportError(_)));
        assert!(err.source().unwrap().downcast_ref::<ureq::Error>().is_some());
    }

    #[test]
    fn missing_config_names_key() {
        let err = ApiError::MissingConfig { key: "password" };
        assert_eq!(err.to_string(), "config key 'password' is missing");
    }
}
