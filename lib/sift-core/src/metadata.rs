//! Response metadata.
//!
//! [`Metadata`] holds everything about an HTTP response except its body:
//! the URL, status code, status text and headers.

use std::collections::HashMap;

/// Non-body fields of an HTTP response.
///
/// Header names are kept as reported by the transport. Repeated headers are
/// expected to be joined with `", "` before they get here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    url: String,
    status_code: u16,
    status_text: String,
    headers: HashMap<String, String>,
}

impl Metadata {
    /// Creates metadata for the given URL and status code.
    ///
    /// The status text defaults to the canonical reason phrase, or is empty
    /// when the code has none.
    #[must_use]
    pub fn new(url: impl Into<String>, status_code: u16) -> Self {
        let status_text = http::StatusCode::from_u16(status_code)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or_default()
            .to_string();

        Self {
            url: url.into(),
            status_code,
            status_text,
            headers: HashMap::new(),
        }
    }

    /// Replaces the status text.
    #[must_use]
    pub fn with_status_text(mut self, status_text: impl Into<String>) -> Self {
        self.status_text = status_text.into();
        self
    }

    /// Sets a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets multiple headers.
    #[must_use]
    pub fn with_headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Final URL of the response.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    /// HTTP status text (reason phrase).
    #[must_use]
    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value, matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status_code >= 200 && self.status_code < 300
    }
}
