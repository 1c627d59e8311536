//! Client error types.

use std::time::Duration;

use thiserror::Error;

/// Boxed underlying cause attached to network errors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Client error type.
///
/// Every variant carries a human-readable message. Callers decide whether
/// to retry, refresh credentials, or give up by matching on the variant
/// (or on [`Error::kind`]); the client itself never retries.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller-supplied input was rejected, locally or by the server (4xx).
    #[error("Validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
        /// HTTP status code, when the server rejected the request.
        status: Option<u16>,
    },

    /// The credential was rejected (HTTP 401).
    #[error("Authentication failed: {message}")]
    Authentication {
        /// Error message.
        message: String,
        /// HTTP status code.
        status: Option<u16>,
    },

    /// The request was throttled (HTTP 429).
    #[error("Rate limited: {message}")]
    RateLimit {
        /// Error message.
        message: String,
        /// Server-suggested delay before retrying, from `Retry-After`.
        retry_after: Option<Duration>,
    },

    /// Server-side failure (5xx) or a success body that failed to decode.
    #[error("API error: {message}")]
    Api {
        /// Error message.
        message: String,
        /// HTTP status code.
        status: Option<u16>,
    },

    /// Transport failure, malformed target URL, or an unexpected status code.
    #[error("{message}")]
    Network {
        /// Error message.
        message: String,
        /// Underlying failure.
        #[source]
        source: Option<BoxError>,
    },
}

/// Discriminator for [`Error`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Authentication,
    RateLimit,
    Api,
    Network,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Authentication => "authentication",
            ErrorKind::RateLimit => "rate_limit",
            ErrorKind::Api => "api",
            ErrorKind::Network => "network",
        };
        f.write_str(name)
    }
}

impl Error {
    /// Create a validation error that never reached the server.
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation {
            message: message.into(),
            status: None,
        }
    }

    /// Create a network error without an underlying cause.
    pub fn network(message: impl Into<String>) -> Self {
        Error::Network {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap a transport failure as a network error.
    pub fn from_transport(err: impl Into<BoxError>) -> Self {
        let source = err.into();
        Error::Network {
            message: format!("Network error: {}", source),
            source: Some(source),
        }
    }

    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation { .. } => ErrorKind::Validation,
            Error::Authentication { .. } => ErrorKind::Authentication,
            Error::RateLimit { .. } => ErrorKind::RateLimit,
            Error::Api { .. } => ErrorKind::Api,
            Error::Network { .. } => ErrorKind::Network,
        }
    }

    /// The human-readable message, without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            Error::Validation { message, .. }
            | Error::Authentication { message, .. }
            | Error::RateLimit { message, .. }
            | Error::Api { message, .. }
            | Error::Network { message, .. } => message,
        }
    }

    /// HTTP status code associated with this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Validation { status, .. }
            | Error::Authentication { status, .. }
            | Error::Api { status, .. } => *status,
            Error::RateLimit { .. } => Some(429),
            Error::Network { .. } => None,
        }
    }

    /// Retry hint for rate-limit errors.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Error::RateLimit { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Authentication { .. })
    }

    /// Check if this is a rate limit error.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::RateLimit { .. })
    }

    /// Whether a caller might reasonably retry the same request later.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::RateLimit { .. } | Error::Network { .. } => true,
            Error::Api { status, .. } => status.is_some_and(|s| s >= 500),
            Error::Validation { .. } | Error::Authentication { .. } => false,
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;
