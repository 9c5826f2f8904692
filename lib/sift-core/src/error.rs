//! Error types for sift.
//!
//! Two taxonomies share the same five members:
//! - [`DetailedError`] keeps the metadata and body whenever a response arrived.
//! - [`Error`] is the bare form: a failing status is reduced to its code and a
//!   decoding failure to its reason.

use std::fmt;

use derive_more::{Display, Error};

use crate::Metadata;

// ============================================================================
// Detailed Error
// ============================================================================

/// Failure of a request, with everything the response carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailedError<B> {
    /// The request URL was malformed.
    BadUrl(String),
    /// No response before the deadline.
    Timeout,
    /// Transport failure.
    NetworkError,
    /// The response status marks a failure. The body was not decoded.
    BadStatus {
        /// Response metadata.
        metadata: Metadata,
        /// Response body.
        body: B,
    },
    /// The status was good but the decoder rejected the body.
    BadBody {
        /// Response metadata.
        metadata: Metadata,
        /// Response body.
        body: B,
        /// Failure reason reported by the decoder.
        reason: String,
    },
}

impl<B> DetailedError<B> {
    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a network error.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::NetworkError)
    }

    /// Response metadata, when a response arrived.
    #[must_use]
    pub const fn metadata(&self) -> Option<&Metadata> {
        match self {
            Self::BadStatus { metadata, .. } | Self::BadBody { metadata, .. } => Some(metadata),
            _ => None,
        }
    }

    /// Response body, when a response arrived.
    #[must_use]
    pub const fn body(&self) -> Option<&B> {
        match self {
            Self::BadStatus { body, .. } | Self::BadBody { body, .. } => Some(body),
            _ => None,
        }
    }

    /// HTTP status code, when a response arrived.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.metadata().map(Metadata::status_code)
    }

    /// Decoder failure reason for [`DetailedError::BadBody`].
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::BadBody { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

impl<B> fmt::Display for DetailedError<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadUrl(url) => write!(f, "bad url: {url}"),
            Self::Timeout => write!(f, "request timeout"),
            Self::NetworkError => write!(f, "network error"),
            Self::BadStatus { metadata, .. } => write!(
                f,
                "bad status {} {} from {}",
                metadata.status_code(),
                metadata.status_text(),
                metadata.url()
            ),
            Self::BadBody {
                metadata, reason, ..
            } => write!(f, "bad body from {}: {reason}", metadata.url()),
        }
    }
}

impl<B: fmt::Debug> std::error::Error for DetailedError<B> {}

// ============================================================================
// Bare Error
// ============================================================================

/// Failure of a request, without response metadata or body.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum Error {
    /// The request URL was malformed.
    #[display("bad url: {_0}")]
    BadUrl(#[error(not(source))] String),

    /// No response before the deadline.
    #[display("request timeout")]
    Timeout,

    /// Transport failure.
    #[display("network error")]
    NetworkError,

    /// The response status marks a failure.
    #[display("bad status: {_0}")]
    BadStatus(#[error(not(source))] u16),

    /// The decoder rejected the body.
    #[display("bad body: {_0}")]
    BadBody(#[error(not(source))] String),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a network error.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::NetworkError)
    }

    /// Returns the HTTP status code if this is a bad status error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::BadStatus(status) => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if this is a client error (4xx).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }

    /// Returns `true` if this is a server error (5xx).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| (500..600).contains(&s))
    }
}

impl<B> From<DetailedError<B>> for Error {
    fn from(error: DetailedError<B>) -> Self {
        match error {
            DetailedError::BadUrl(url) => Self::BadUrl(url),
            DetailedError::Timeout => Self::Timeout,
            DetailedError::NetworkError => Self::NetworkError,
            DetailedError::BadStatus { metadata, .. } => Self::BadStatus(metadata.status_code()),
            DetailedError::BadBody { reason, .. } => Self::BadBody(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server_error() -> DetailedError<String> {
        DetailedError::BadStatus {
            metadata: Metadata::new("https://x", 500),
            body: "err".to_string(),
        }
    }

    #[test]
    fn error_display() {
        assert_eq!(Error::BadUrl("nope".to_string()).to_string(), "bad url: nope");
        assert_eq!(Error::Timeout.to_string(), "request timeout");
        assert_eq!(Error::NetworkError.to_string(), "network error");
        assert_eq!(Error::BadStatus(404).to_string(), "bad status: 404");
        assert_eq!(
            Error::BadBody("expected value at line 1 column 1".to_string()).to_string(),
            "bad body: expected value at line 1 column 1"
        );
    }

    #[test]
    fn detailed_error_display() {
        assert_eq!(
            server_error().to_string(),
            "bad status 500 Internal Server Error from https://x"
        );

        let err: DetailedError<String> = DetailedError::BadBody {
            metadata: Metadata::new("https://x", 200),
            body: "{}".to_string(),
            reason: "missing field `x`".to_string(),
        };
        assert_eq!(err.to_string(), "bad body from https://x: missing field `x`");
    }

    #[test]
    fn error_status() {
        let err = Error::BadStatus(404);
        assert_eq!(err.status(), Some(404));
        assert!(err.is_client_error());
        assert!(!err.is_server_error());

        let err = Error::BadStatus(503);
        assert!(err.is_server_error());

        assert_eq!(Error::Timeout.status(), None);
        assert!(Error::Timeout.is_timeout());
        assert!(Error::NetworkError.is_network_error());
    }

    #[test]
    fn detailed_error_accessors() {
        let err = server_error();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.body().map(String::as_str), Some("err"));
        assert_eq!(err.reason(), None);

        let err: DetailedError<String> = DetailedError::Timeout;
        assert!(err.is_timeout());
        assert!(err.metadata().is_none());
        assert!(err.body().is_none());
    }

    #[test]
    fn detailed_error_flattens() {
        assert_eq!(Error::from(server_error()), Error::BadStatus(500));

        let err: DetailedError<String> = DetailedError::BadBody {
            metadata: Metadata::new("https://x", 200),
            body: "oops".to_string(),
            reason: "Error decoding bytes".to_string(),
        };
        assert_eq!(
            Error::from(err),
            Error::BadBody("Error decoding bytes".to_string())
        );

        assert_eq!(
            Error::from(DetailedError::<String>::BadUrl("nope".to_string())),
            Error::BadUrl("nope".to_string())
        );
        assert_eq!(Error::from(DetailedError::<String>::Timeout), Error::Timeout);
        assert_eq!(
            Error::from(DetailedError::<String>::NetworkError),
            Error::NetworkError
        );
    }
}
