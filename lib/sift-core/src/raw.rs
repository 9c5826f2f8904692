//! Raw transport responses.
//!
//! [`RawResponse`] is what a transport hands back once a request is over:
//! either a failure before any response arrived, or a response with its
//! metadata and body.
//!
//! # Example
//!
//! ```
//! use sift_core::{Metadata, RawResponse};
//!
//! let raw: RawResponse<String> =
//!     RawResponse::from_status(Metadata::new("https://example.com", 404), "gone");
//! assert!(matches!(raw, RawResponse::BadStatus { .. }));
//! ```

use bytes::Bytes;

use crate::Metadata;

/// Outcome of a single transport attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawResponse<B = Bytes> {
    /// The request URL was malformed; nothing was sent.
    BadUrl(String),
    /// No response arrived before the deadline.
    Timeout,
    /// The transport failed for a reason not attributable to the server.
    NetworkError,
    /// A response arrived with a failing status.
    BadStatus {
        /// Response metadata.
        metadata: Metadata,
        /// Response body.
        body: B,
    },
    /// A response arrived with a 2xx status.
    GoodStatus {
        /// Response metadata.
        metadata: Metadata,
        /// Response body.
        body: B,
    },
}

impl<B> RawResponse<B> {
    /// Classifies a received response by its status code.
    ///
    /// 2xx gives [`RawResponse::GoodStatus`], anything else
    /// [`RawResponse::BadStatus`].
    #[must_use]
    pub fn from_status(metadata: Metadata, body: impl Into<B>) -> Self {
        let body = body.into();
        if metadata.is_success() {
            Self::GoodStatus { metadata, body }
        } else {
            Self::BadStatus { metadata, body }
        }
    }

    /// Creates a [`RawResponse::BadUrl`].
    #[must_use]
    pub fn bad_url(url: impl Into<String>) -> Self {
        Self::BadUrl(url.into())
    }

    /// A response was received, whatever its status.
    #[must_use]
    pub const fn has_response(&self) -> bool {
        matches!(self, Self::BadStatus { .. } | Self::GoodStatus { .. })
    }

    /// A response was received with a 2xx status.
    #[must_use]
    pub const fn is_good_status(&self) -> bool {
        matches!(self, Self::GoodStatus { .. })
    }

    /// Transform the body with a function, keeping the variant.
    pub fn map_body<F, B2>(self, f: F) -> RawResponse<B2>
    where
        F: FnOnce(B) -> B2,
    {
        match self {
            Self::BadUrl(url) => RawResponse::BadUrl(url),
            Self::Timeout => RawResponse::Timeout,
            Self::NetworkError => RawResponse::NetworkError,
            Self::BadStatus { metadata, body } => RawResponse::BadStatus {
                metadata,
                body: f(body),
            },
            Self::GoodStatus { metadata, body } => RawResponse::GoodStatus {
                metadata,
                body: f(body),
            },
        }
    }
}
