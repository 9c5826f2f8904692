//! HTTP transport using hyper-util.
//!
//! A transport never fails: every outcome of an exchange, including a
//! malformed URL, an expired deadline or a dropped connection, is reported
//! as a [`RawResponse`].

use std::collections::HashMap;
use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_rustls::HttpsConnector;
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};
use sift_core::{Metadata, RawResponse};
use tower::Layer;
use tower::util::BoxCloneService;
use tower_service::Service;
use tracing::{debug, warn};

#[cfg(feature = "middleware-logging")]
use crate::middleware::LoggingLayer;
use crate::{
    Expect, Request,
    config::{TransportConfig, TransportConfigBuilder},
    connector::https_connector,
};

/// Sends requests and reports what happened.
pub trait Transport: Send + Sync {
    /// Perform the exchange.
    fn send(&self, request: Request) -> impl Future<Output = RawResponse<Bytes>> + Send;

    /// Perform the exchange and hand its outcome to `expect`.
    fn dispatch<Msg>(
        &self,
        request: Request,
        expect: Expect<Msg>,
    ) -> impl Future<Output = Msg> + Send {
        async move { expect.handle(self.send(request).await) }
    }
}

// ============================================================================
// Type-Erased Service for Middleware Composition
// ============================================================================

/// Type-erased service for middleware composition.
pub type BoxedService = BoxCloneService<Request, RawResponse<Bytes>, Infallible>;

/// Future type for Tower Service implementation.
pub type ServiceFuture =
    Pin<Box<dyn Future<Output = Result<RawResponse<Bytes>, Infallible>> + Send + 'static>>;

/// Makes a [`BoxedService`] shareable across threads.
#[derive(Clone)]
struct SyncService {
    inner: Arc<Mutex<BoxedService>>,
}

impl SyncService {
    fn new(service: BoxedService) -> Self {
        Self {
            inner: Arc::new(Mutex::new(service)),
        }
    }

    fn call(&self, request: Request) -> ServiceFuture {
        // Lock, clone the service, and release the lock immediately
        let mut service = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone();

        Box::pin(async move { service.call(request).await })
    }
}

// ============================================================================
// Raw Transport (internal, used for direct hyper access)
// ============================================================================

#[derive(Clone)]
struct RawHyperTransport {
    inner: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    config: TransportConfig,
}

/// Status, headers and body of a completed exchange.
type Exchange = (u16, HashMap<String, String>, Bytes);

impl RawHyperTransport {
    fn new(config: TransportConfig) -> Self {
        let connector = https_connector(&config);

        let inner = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_idle_per_host)
            .build(connector);

        Self { inner, config }
    }

    /// Only absolute `http` and `https` URLs can be sent.
    fn parse_url(raw: &str) -> Option<url::Url> {
        url::Url::parse(raw)
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https"))
    }

    fn build_hyper_request(
        request: Request,
        url: &url::Url,
    ) -> Result<http::Request<Full<Bytes>>, http::Error> {
        let (method, _, headers, body) = request.into_parts();

        let mut builder = http::Request::builder().method(method).uri(url.as_str());
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder.body(body.map_or_else(Full::default, Full::new))
    }

    /// Response headers, repeated names joined with `", "`.
    ///
    /// Values that are not UTF-8 are kept, with invalid sequences replaced.
    fn extract_headers(headers: &http::HeaderMap) -> HashMap<String, String> {
        let mut extracted = HashMap::<String, String>::new();
        for (name, value) in headers {
            let value = String::from_utf8_lossy(value.as_bytes());
            extracted
                .entry(name.to_string())
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(&value);
                })
                .or_insert_with(|| value.into_owned());
        }
        extracted
    }

    async fn exchange(&self, request: http::Request<Full<Bytes>>) -> Result<Exchange, String> {
        let response = self
            .inner
            .request(request)
            .await
            .map_err(|err| err.to_string())?;

        let status = response.status().as_u16();
        let headers = Self::extract_headers(response.headers());

        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|err| err.to_string())?
            .to_bytes();

        Ok((status, headers, body))
    }

    async fn execute(&self, request: Request) -> RawResponse<Bytes> {
        let Some(url) = Self::parse_url(request.url()) else {
            debug!(url = request.url(), "rejecting malformed url");
            return RawResponse::bad_url(request.url());
        };
        let deadline = request.timeout().unwrap_or(self.config.timeout);

        let hyper_request = match Self::build_hyper_request(request, &url) {
            Ok(hyper_request) => hyper_request,
            Err(err) => {
                warn!(error = %err, %url, "invalid request");
                return RawResponse::NetworkError;
            }
        };

        match tokio::time::timeout(deadline, self.exchange(hyper_request)).await {
            Err(_) => {
                debug!(%url, ?deadline, "deadline expired");
                RawResponse::Timeout
            }
            Ok(Err(err)) => {
                warn!(error = %err, %url, "exchange failed");
                RawResponse::NetworkError
            }
            Ok(Ok((status, headers, body))) => {
                let metadata = Metadata::new(url.as_str(), status).with_headers(headers);
                RawResponse::from_status(metadata, body)
            }
        }
    }
}

impl Service<Request> for RawHyperTransport {
    type Response = RawResponse<Bytes>;
    type Error = Infallible;
    type Future = ServiceFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Infallible>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let transport = self.clone();
        Box::pin(async move { Ok(transport.execute(request).await) })
    }
}

// ============================================================================
// Public Transport
// ============================================================================

/// HTTP transport with connection pooling, TLS, and middleware support.
///
/// # Example
///
/// ```ignore
/// use sift::{HyperTransport, Request, Transport};
/// use std::time::Duration;
///
/// let transport = HyperTransport::builder()
///     .timeout(Duration::from_secs(5))
///     .build();
///
/// let raw = transport.send(Request::get("https://example.com").build()).await;
/// ```
#[derive(Clone)]
pub struct HyperTransport {
    service: SyncService,
    config: TransportConfig,
}

impl std::fmt::Debug for HyperTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperTransport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HyperTransport {
    /// Create a new transport with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TransportConfig::default())
    }

    /// Create a new transport with custom configuration (no middleware).
    #[must_use]
    pub fn with_config(config: TransportConfig) -> Self {
        let raw = RawHyperTransport::new(config.clone());
        Self::with_service(BoxCloneService::new(raw), config)
    }

    fn with_service(service: BoxedService, config: TransportConfig) -> Self {
        Self {
            service: SyncService::new(service),
            config,
        }
    }

    /// Create a new transport builder.
    #[must_use]
    pub fn builder() -> HyperTransportBuilder {
        HyperTransportBuilder::default()
    }

    /// Get the transport configuration.
    #[must_use]
    pub const fn config(&self) -> &TransportConfig {
        &self.config
    }
}

impl Default for HyperTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HyperTransport {
    async fn send(&self, request: Request) -> RawResponse<Bytes> {
        self.service
            .call(request)
            .await
            .unwrap_or_else(|never| match never {})
    }
}

impl Service<Request> for HyperTransport {
    type Response = RawResponse<Bytes>;
    type Error = Infallible;
    type Future = ServiceFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Infallible>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request) -> Self::Future {
        self.service.call(request)
    }
}

/// Builder for [`HyperTransport`].
///
/// # Example
///
/// ```ignore
/// use sift::HyperTransport;
/// use sift::middleware::LoggingLayer;
///
/// let transport = HyperTransport::builder()
///     .layer(LoggingLayer::debug())
///     .build();
/// ```
#[derive(Default)]
pub struct HyperTransportBuilder {
    config: TransportConfigBuilder,
    layers: Vec<Arc<dyn Fn(BoxedService) -> BoxedService + Send + Sync>>,
    use_defaults: bool,
}

impl std::fmt::Debug for HyperTransportBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperTransportBuilder")
            .field("config", &self.config)
            .field("layers_count", &self.layers.len())
            .field("use_defaults", &self.use_defaults)
            .finish()
    }
}

impl HyperTransportBuilder {
    /// Set the default deadline for a whole exchange.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.connect_timeout(timeout);
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.config = self.config.pool_idle_per_host(count);
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.pool_idle_timeout(timeout);
        self
    }

    /// Add a Tower layer to the transport.
    ///
    /// Layers are applied in order: first added = outermost (processes requests first).
    #[must_use]
    pub fn layer<L>(mut self, layer: L) -> Self
    where
        L: Layer<BoxedService> + Send + Sync + 'static,
        L::Service: Service<Request, Response = RawResponse<Bytes>, Error = Infallible>
            + Clone
            + Send
            + 'static,
        <L::Service as Service<Request>>::Future: Send,
    {
        self.layers.push(Arc::new(move |service| {
            BoxCloneService::new(layer.layer(service))
        }));
        self
    }

    /// Alias for [`layer`](Self::layer).
    #[must_use]
    pub fn with<L>(self, layer: L) -> Self
    where
        L: Layer<BoxedService> + Send + Sync + 'static,
        L::Service: Service<Request, Response = RawResponse<Bytes>, Error = Infallible>
            + Clone
            + Send
            + 'static,
        <L::Service as Service<Request>>::Future: Send,
    {
        self.layer(layer)
    }

    /// Enable default middleware: logging, with the `middleware-logging` feature.
    ///
    /// Defaults are applied before any layers added via `.layer()`.
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        self.use_defaults = true;
        self
    }

    /// Disable all default middleware.
    #[must_use]
    pub fn without_defaults(mut self) -> Self {
        self.use_defaults = false;
        self
    }

    /// Add request/outcome logging.
    #[cfg(feature = "middleware-logging")]
    #[must_use]
    pub fn with_logging(self) -> Self {
        self.layer(LoggingLayer::new())
    }

    /// Add debug-level logging (includes request headers).
    #[cfg(feature = "middleware-logging")]
    #[must_use]
    pub fn with_debug_logging(self) -> Self {
        self.layer(LoggingLayer::debug())
    }

    /// Build the transport with all configured middleware.
    #[must_use]
    pub fn build(self) -> HyperTransport {
        let config = self.config.build();
        let mut service: BoxedService =
            BoxCloneService::new(RawHyperTransport::new(config.clone()));

        if self.use_defaults {
            #[cfg(feature = "middleware-logging")]
            {
                service = BoxCloneService::new(LoggingLayer::new().layer(service));
            }
        }

        // Apply user layers in order (first added = outermost)
        for layer_fn in self.layers {
            service = layer_fn(service);
        }

        HyperTransport::with_service(service, config)
    }
}
