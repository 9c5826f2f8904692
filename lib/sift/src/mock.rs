//! Mocked expectations.
//!
//! A mocked [`Expect`] ignores whatever the transport delivers and resolves
//! a canned [`RawResponse`] instead. The request may still go out; its
//! response is dropped.
//!
//! # Example
//!
//! ```
//! use sift::mock;
//! use sift::{Bare, Error, Metadata, RawResponse};
//!
//! let canned: RawResponse<String> =
//!     RawResponse::from_status(Metadata::new("https://x", 503), "maintenance");
//! let expect = mock::expect_string::<Bare, _>(canned, |result| result);
//!
//! // Whatever the transport got, the canned response is what gets resolved.
//! assert_eq!(expect.handle(RawResponse::Timeout), Err(Error::BadStatus(503)));
//! ```

use bytes::Bytes;
use sift_core::{
    Decoder, RawResponse, Shape, Shaped, response_to, response_to_json, response_to_string,
    response_to_whatever,
};
use tracing::debug;

use crate::Expect;

/// Build an expectation that resolves `canned` instead of the real response.
///
/// `resolve` turns the canned response into a result, `to_msg` turns that
/// result into the caller's message.
pub fn mock_expect<B, R, Msg, F, G>(canned: RawResponse<B>, to_msg: F, resolve: G) -> Expect<Msg>
where
    B: Send + 'static,
    F: FnOnce(R) -> Msg + Send + 'static,
    G: FnOnce(RawResponse<B>) -> R + Send + 'static,
    Msg: 'static,
{
    Expect::new(move |actual: RawResponse<Bytes>| {
        debug!(
            actual_has_response = actual.has_response(),
            canned_has_response = canned.has_response(),
            "discarding transport response for canned response"
        );
        to_msg(resolve(canned))
    })
}

/// Mocked [`expect_string`](crate::expect_string).
pub fn expect_string<S, Msg>(
    canned: RawResponse<String>,
    to_msg: impl FnOnce(Shaped<S, String, String>) -> Msg + Send + 'static,
) -> Expect<Msg>
where
    S: Shape<String, String> + 'static,
    Msg: 'static,
{
    mock_expect(canned, to_msg, response_to_string::<S>)
}

/// Mocked [`expect_json`](crate::expect_json).
pub fn expect_json<S, T, Msg>(
    canned: RawResponse<String>,
    to_msg: impl FnOnce(Shaped<S, String, T>) -> Msg + Send + 'static,
) -> Expect<Msg>
where
    T: serde::de::DeserializeOwned + 'static,
    S: Shape<String, T> + 'static,
    Msg: 'static,
{
    mock_expect(canned, to_msg, response_to_json::<S, T>)
}

/// Mocked [`expect_bytes`](crate::expect_bytes).
pub fn expect_bytes<S, D, Msg>(
    canned: RawResponse<Bytes>,
    decoder: D,
    to_msg: impl FnOnce(Shaped<S, Bytes, D::Output>) -> Msg + Send + 'static,
) -> Expect<Msg>
where
    D: Decoder<Bytes> + Send + 'static,
    S: Shape<Bytes, D::Output> + 'static,
    Msg: 'static,
{
    mock_expect(canned, to_msg, move |raw| response_to::<S, _, _>(&decoder, raw))
}

/// Mocked [`expect_whatever`](crate::expect_whatever).
pub fn expect_whatever<S, B, Msg>(
    canned: RawResponse<B>,
    to_msg: impl FnOnce(Shaped<S, B, ()>) -> Msg + Send + 'static,
) -> Expect<Msg>
where
    B: Send + 'static,
    S: Shape<B, ()> + 'static,
    Msg: 'static,
{
    mock_expect(canned, to_msg, response_to_whatever::<S, B>)
}
