//! Integration tests for transport middleware.

use std::convert::Infallible;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::task::{Context, Poll};

use bytes::Bytes;
use sift::middleware::{Layer, LoggingLayer};
use sift::{BoxedService, HyperTransport, RawResponse, Request, ServiceFuture, Transport};
use tower::Service;
use wiremock::{Mock, MockServer, ResponseTemplate, matchers::method};

/// Counts the requests going through.
#[derive(Clone)]
struct CountingLayer(Arc<AtomicUsize>);

#[derive(Clone)]
struct Counting {
    inner: BoxedService,
    count: Arc<AtomicUsize>,
}

impl Layer<BoxedService> for CountingLayer {
    type Service = Counting;

    fn layer(&self, inner: BoxedService) -> Self::Service {
        Counting {
            inner,
            count: Arc::clone(&self.0),
        }
    }
}

impl Service<Request> for Counting {
    type Response = RawResponse<Bytes>;
    type Error = Infallible;
    type Future = ServiceFuture;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Infallible>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.inner.call(request)
    }
}

#[tokio::test]
async fn test_custom_layer_sees_every_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let count = Arc::new(AtomicUsize::new(0));
    let transport = HyperTransport::builder()
        .layer(CountingLayer(Arc::clone(&count)))
        .layer(LoggingLayer::debug())
        .build();

    transport.send(Request::get(mock_server.uri()).build()).await;
    transport.send(Request::get("not a url").build()).await;

    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[cfg(feature = "middleware-logging")]
#[tokio::test]
async fn test_logging_helpers_keep_outcome() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
        .mount(&mock_server)
        .await;

    let transports = [
        HyperTransport::builder().with_defaults().build(),
        HyperTransport::builder().with_logging().build(),
        HyperTransport::builder().with_debug_logging().build(),
    ];

    for transport in transports {
        let raw = transport.send(Request::get(mock_server.uri()).build()).await;
        assert_eq!(raw.status_code(), Ok(503));
        assert_eq!(raw.body(), Ok(&Bytes::from_static(b"busy")));
    }
}
