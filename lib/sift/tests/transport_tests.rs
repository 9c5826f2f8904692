//! Integration tests for `HyperTransport` using wiremock.

use std::time::Duration;

use bytes::Bytes;
use sift::{HyperTransport, RawResponse, Request, Transport};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path, query_param},
};

#[tokio::test]
async fn test_good_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-request-id", "42")
                .set_body_string(r#"{"id":1}"#),
        )
        .mount(&mock_server)
        .await;

    let transport = HyperTransport::new();
    let url = format!("{}/users/1", mock_server.uri());
    let raw = transport.send(Request::get(&url).build()).await;

    assert!(raw.is_good_status());
    assert_eq!(raw.url(), Ok(url.as_str()));
    assert_eq!(raw.status_code(), Ok(200));
    assert_eq!(raw.status_text(), Ok("OK"));
    assert_eq!(
        raw.metadata().ok().and_then(|metadata| metadata.header("X-Request-Id")),
        Some("42")
    );
    assert_eq!(raw.body(), Ok(&Bytes::from_static(br#"{"id":1}"#)));
}

#[tokio::test]
async fn test_bad_status_keeps_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such thing"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500).set_body_string(r#"{"error":"boom"}"#))
        .mount(&mock_server)
        .await;

    let transport = HyperTransport::new();

    let url = format!("{}/missing", mock_server.uri());
    let raw = transport.send(Request::get(&url).build()).await;
    let RawResponse::BadStatus { metadata, body } = raw else {
        panic!("expected bad status, got {raw:?}");
    };
    assert_eq!(metadata.status_code(), 404);
    assert_eq!(metadata.status_text(), "Not Found");
    assert_eq!(metadata.url(), url);
    assert_eq!(body, Bytes::from_static(b"no such thing"));

    let url = format!("{}/broken", mock_server.uri());
    let raw = transport.send(Request::get(&url).build()).await;
    assert_eq!(raw.status_code(), Ok(500));
    assert_eq!(raw.body(), Ok(&Bytes::from_static(br#"{"error":"boom"}"#)));
}

#[tokio::test]
async fn test_post_request_with_json_body() {
    let mock_server = MockServer::start().await;
    let input = serde_json::json!({"name": "Bob"});

    Mock::given(method("POST"))
        .and(path("/users"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(&input))
        .respond_with(ResponseTemplate::new(201))
        .mount(&mock_server)
        .await;

    let transport = HyperTransport::new();
    let request = Request::post(format!("{}/users", mock_server.uri()))
        .json(&input)
        .expect("json body")
        .build();

    let raw = transport.send(request).await;
    assert!(raw.is_good_status());
    assert_eq!(raw.status_code(), Ok(201));
}

#[tokio::test]
async fn test_query_and_headers_are_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "rust lang"))
        .and(query_param("page", "2"))
        .and(header("X-Api-Key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_string("found"))
        .mount(&mock_server)
        .await;

    let transport = HyperTransport::new();
    let request = Request::get(format!("{}/search", mock_server.uri()))
        .query("q", "rust lang")
        .query("page", "2")
        .headers(sift::list_to_headers([("X-Api-Key", "secret")]))
        .build();

    let raw = transport.send(request).await;
    assert_eq!(raw.status_code(), Ok(200));
    assert_eq!(raw.body(), Ok(&Bytes::from_static(b"found")));
}

#[tokio::test]
async fn test_repeated_response_headers_are_joined() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("x-tag", "a")
                .append_header("x-tag", "b"),
        )
        .mount(&mock_server)
        .await;

    let transport = HyperTransport::new();
    let raw = transport.send(Request::get(mock_server.uri()).build()).await;

    let metadata = raw.metadata().expect("metadata");
    assert_eq!(metadata.header("x-tag"), Some("a, b"));
}

#[tokio::test]
async fn test_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let transport = HyperTransport::builder()
        .timeout(Duration::from_millis(100))
        .build();
    let raw = transport.send(Request::get(mock_server.uri()).build()).await;
    assert_eq!(raw, RawResponse::Timeout);
}

#[tokio::test]
async fn test_request_timeout_overrides_transport_default() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let transport = HyperTransport::new();
    let request = Request::get(mock_server.uri())
        .timeout(Duration::from_millis(100))
        .build();
    assert_eq!(transport.send(request).await, RawResponse::Timeout);
}

#[tokio::test]
async fn test_connection_error() {
    let transport = HyperTransport::builder()
        .connect_timeout(Duration::from_secs(1))
        .build();

    let raw = transport.send(Request::get("http://127.0.0.1:1").build()).await;
    assert_eq!(raw, RawResponse::NetworkError);
}

#[tokio::test]
async fn test_bad_url() {
    let transport = HyperTransport::new();

    for url in ["not a url", "ftp://example.com/file", ""] {
        let raw = transport.send(Request::get(url).build()).await;
        assert_eq!(raw, RawResponse::bad_url(url));
    }
}

#[tokio::test]
async fn test_tower_service() {
    use tower::ServiceExt;

    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let raw = HyperTransport::new()
        .oneshot(Request::get(mock_server.uri()).build())
        .await
        .unwrap_or_else(|never| match never {});

    let RawResponse::GoodStatus { metadata, body } = raw else {
        panic!("expected good status, got {raw:?}");
    };
    assert_eq!(metadata.url(), format!("{}/", mock_server.uri()));
    assert_eq!(metadata.status_code(), 204);
    assert_eq!(metadata.status_text(), "No Content");
    assert!(body.is_empty());
}
