//! Mocked expectations against a live transport.

use assert2::{check, let_assert};
use bytes::Bytes;
use serde::Deserialize;
use sift::{
    Bare, DetailedError, Error, HyperTransport, Metadata, RawResponse, Record, Request, Transport,
    Tuple, binary, mock,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

#[derive(Debug, PartialEq, Eq, Deserialize)]
struct Point {
    x: i64,
}

async fn server() -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/point"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"x":1}"#))
        .mount(&mock_server)
        .await;

    mock_server
}

fn request(server: &MockServer) -> Request {
    Request::get(format!("{}/point", server.uri())).build()
}

#[tokio::test]
async fn test_canned_failure_replaces_success() {
    let server = server().await;
    let transport = HyperTransport::new();

    let canned: RawResponse<String> = RawResponse::from_status(
        Metadata::new("https://canned.example/point", 500),
        "maintenance",
    );
    let result = transport
        .dispatch(
            request(&server),
            mock::expect_json::<Tuple, Point, _>(canned, |r| r),
        )
        .await;

    let_assert!(Err(DetailedError::BadStatus { metadata, body }) = result);
    check!(metadata.url() == "https://canned.example/point");
    check!(metadata.status_code() == 500);
    check!(body == "maintenance");

    // The request still reached the server.
    let received = server.received_requests().await.unwrap_or_default();
    check!(received.len() == 1);
}

#[tokio::test]
async fn test_canned_success_replaces_failure() {
    let transport = HyperTransport::new();

    let canned: RawResponse<String> =
        RawResponse::from_status(Metadata::new("https://canned.example", 200), r#"{"x":7}"#);
    let result = transport
        .dispatch(
            Request::get("not a url").build(),
            mock::expect_json::<Bare, Point, _>(canned, |r| r),
        )
        .await;

    check!(result == Ok(Point { x: 7 }));
}

#[tokio::test]
async fn test_canned_transport_failures() {
    let server = server().await;
    let transport = HyperTransport::new();

    let timeout = transport
        .dispatch(
            request(&server),
            mock::expect_string::<Record, _>(RawResponse::Timeout, |r| r),
        )
        .await;
    check!(timeout == Err(DetailedError::Timeout));

    let network = transport
        .dispatch(
            request(&server),
            mock::expect_whatever::<Bare, String, _>(RawResponse::NetworkError, |r| r),
        )
        .await;
    check!(network == Err(Error::NetworkError));
}

#[tokio::test]
async fn test_canned_bytes() {
    let server = server().await;
    let transport = HyperTransport::new();

    let canned = RawResponse::from_status(
        Metadata::new("https://canned.example", 200),
        Bytes::from_static(&[]),
    );
    let first_byte = binary(|bytes: &[u8]| bytes.first().copied());
    let result = transport
        .dispatch(
            request(&server),
            mock::expect_bytes::<Bare, _, _>(canned, first_byte, |r| r),
        )
        .await;

    check!(result == Err(Error::BadBody("Error decoding bytes".to_string())));
}
