//! Request/outcome logging middleware.
//!
//! This middleware logs each exchange and how it was classified using the
//! `tracing` crate.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use bytes::Bytes;
use sift_core::RawResponse;
use tower::{Layer, Service};
use tracing::{Instrument, Level, debug, info, span, warn};

use crate::Request;

/// Layer that adds request/outcome logging.
///
/// # Example
///
/// ```ignore
/// use sift::HyperTransport;
/// use sift::middleware::LoggingLayer;
///
/// let transport = HyperTransport::builder()
///     .layer(LoggingLayer::new())
///     .build();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer {
    level: LogLevel,
}

/// Log level for the logging middleware.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Log at debug level (request headers included).
    Debug,
    /// Log at info level (summary only).
    #[default]
    Info,
}

impl LoggingLayer {
    /// Create a new logging layer with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a logging layer that logs at debug level.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            level: LogLevel::Debug,
        }
    }

    /// Configured level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logging {
            inner,
            level: self.level,
        }
    }
}

/// Service that logs requests and their outcome.
#[derive(Debug, Clone)]
pub struct Logging<S> {
    inner: S,
    level: LogLevel,
}

impl<S> Logging<S> {
    /// Create a new logging service wrapping the given service.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            level: LogLevel::Info,
        }
    }
}

fn log_outcome(raw: &RawResponse<Bytes>, elapsed_ms: u64) {
    match raw {
        RawResponse::GoodStatus { metadata, .. } => {
            info!(status = metadata.status_code(), elapsed_ms, "request completed");
        }
        RawResponse::BadStatus { metadata, .. } => {
            warn!(
                status = metadata.status_code(),
                elapsed_ms, "request failed with HTTP error"
            );
        }
        RawResponse::BadUrl(url) => warn!(%url, elapsed_ms, "request not sent: bad url"),
        RawResponse::Timeout => warn!(elapsed_ms, "request timed out"),
        RawResponse::NetworkError => warn!(elapsed_ms, "request failed: network error"),
    }
}

impl<S> Service<Request> for Logging<S>
where
    S: Service<Request, Response = RawResponse<Bytes>, Error = Infallible> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = RawResponse<Bytes>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Infallible>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Infallible>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let method = request.method().clone();
        let url = request.url().to_string();
        let level = self.level;

        let span = span!(Level::INFO, "http_request", %method, %url);

        let mut inner = self.inner.clone();
        Box::pin(
            async move {
                let start = Instant::now();

                match level {
                    LogLevel::Debug => {
                        debug!(
                            method = %method,
                            url = %url,
                            headers = ?request.headers(),
                            "sending request"
                        );
                    }
                    LogLevel::Info => {
                        info!(method = %method, url = %url, "sending request");
                    }
                }

                let result = inner.call(request).await;

                // Saturating conversion to u64 (truncates after ~584 million years)
                let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                if let Ok(raw) = &result {
                    log_outcome(raw, elapsed_ms);
                }

                result
            }
            .instrument(span),
        )
    }
}
