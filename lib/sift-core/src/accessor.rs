//! Metadata accessors on [`RawResponse`].
//!
//! Each accessor projects one field out of a response that arrived, or
//! explains why there is none.

use std::collections::HashMap;

use derive_more::{Display, Error};

use crate::{Metadata, RawResponse};

/// Why a [`RawResponse`] has no metadata or body.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum MissingMetadata {
    /// The request URL was malformed.
    #[display("Bad Url: {_0}")]
    BadUrl(#[error(not(source))] String),
    /// No response before the deadline.
    #[display("Timeout")]
    Timeout,
    /// Transport failure.
    #[display("Network Error")]
    NetworkError,
}

impl<B> RawResponse<B> {
    fn parts(&self) -> Result<(&Metadata, &B), MissingMetadata> {
        match self {
            Self::BadUrl(url) => Err(MissingMetadata::BadUrl(url.clone())),
            Self::Timeout => Err(MissingMetadata::Timeout),
            Self::NetworkError => Err(MissingMetadata::NetworkError),
            Self::BadStatus { metadata, body } | Self::GoodStatus { metadata, body } => {
                Ok((metadata, body))
            }
        }
    }

    /// Response metadata.
    pub fn metadata(&self) -> Result<&Metadata, MissingMetadata> {
        self.parts().map(|(metadata, _)| metadata)
    }

    /// Response URL.
    pub fn url(&self) -> Result<&str, MissingMetadata> {
        self.metadata().map(Metadata::url)
    }

    /// HTTP status code.
    pub fn status_code(&self) -> Result<u16, MissingMetadata> {
        self.metadata().map(Metadata::status_code)
    }

    /// HTTP status text.
    pub fn status_text(&self) -> Result<&str, MissingMetadata> {
        self.metadata().map(Metadata::status_text)
    }

    /// Response headers.
    pub fn headers(&self) -> Result<&HashMap<String, String>, MissingMetadata> {
        self.metadata().map(Metadata::headers)
    }

    /// Response body.
    pub fn body(&self) -> Result<&B, MissingMetadata> {
        self.parts().map(|(_, body)| body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(status: u16) -> Metadata {
        Metadata::new("https://x", status)
            .with_status_text("Custom")
            .with_header("x-request-id", "42")
    }

    #[test]
    fn accessors_without_response() {
        let cases: [(RawResponse<String>, &str); 3] = [
            (RawResponse::bad_url("nope"), "Bad Url: nope"),
            (RawResponse::Timeout, "Timeout"),
            (RawResponse::NetworkError, "Network Error"),
        ];

        for (raw, expected) in cases {
            assert_eq!(raw.url().map_err(|e| e.to_string()), Err(expected.to_string()));
            assert_eq!(
                raw.status_code().map_err(|e| e.to_string()),
                Err(expected.to_string())
            );
            assert_eq!(
                raw.status_text().map_err(|e| e.to_string()),
                Err(expected.to_string())
            );
            assert_eq!(
                raw.headers().map_err(|e| e.to_string()),
                Err(expected.to_string())
            );
            assert_eq!(raw.body().map_err(|e| e.to_string()), Err(expected.to_string()));
        }
    }

    #[test]
    fn accessors_with_response() {
        for status in [200, 404] {
            let raw: RawResponse<String> = RawResponse::from_status(metadata(status), "payload");

            assert_eq!(raw.url(), Ok("https://x"));
            assert_eq!(raw.status_code(), Ok(status));
            assert_eq!(raw.status_text(), Ok("Custom"));
            assert_eq!(raw.headers(), Ok(metadata(status).headers()));
            assert_eq!(raw.body().map(String::as_str), Ok("payload"));
            assert_eq!(raw.metadata(), Ok(&metadata(status)));
        }
    }

    #[test]
    fn missing_metadata_variants() {
        let raw = RawResponse::<String>::bad_url("ftp://x");
        assert_eq!(
            raw.metadata(),
            Err(MissingMetadata::BadUrl("ftp://x".to_string()))
        );
    }
}
