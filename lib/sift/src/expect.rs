//! Expectations: what to do with the response of a request.
//!
//! An [`Expect`] is handed to a [`Transport`](crate::Transport) together
//! with a [`Request`](crate::Request). Once the exchange is over, the
//! transport calls [`Expect::handle`] with the [`RawResponse`], which
//! resolves it and passes the shaped result to the caller's continuation.
//!
//! # Example
//!
//! ```ignore
//! use sift::{Request, Transport, Tuple, expect_json};
//!
//! enum Msg {
//!     GotUser(Result<(Metadata, User), DetailedError<String>>),
//! }
//!
//! let request = Request::get("https://api.example.com/users/1").build();
//! let msg = transport
//!     .dispatch(request, expect_json::<Tuple, User, _>(Msg::GotUser))
//!     .await;
//! ```

use std::fmt;

use bytes::Bytes;
use sift_core::{Decoder, Json, RawResponse, Shape, Shaped, Text, Whatever, response_to};

/// Body types an expectation can resolve against.
///
/// Transports deliver bytes; text expectations read them as UTF-8.
pub trait FromBody: Sized {
    /// Convert the transport body.
    fn from_body(body: Bytes) -> Self;
}

impl FromBody for Bytes {
    fn from_body(body: Bytes) -> Self {
        body
    }
}

impl FromBody for String {
    /// Invalid UTF-8 sequences are replaced with `U+FFFD`.
    fn from_body(body: Bytes) -> Self {
        String::from_utf8_lossy(&body).into_owned()
    }
}

type Handler<Msg> = Box<dyn FnOnce(RawResponse<Bytes>) -> Msg + Send>;

/// Continuation registered with a transport for a single request.
pub struct Expect<Msg> {
    handler: Handler<Msg>,
}

impl<Msg> fmt::Debug for Expect<Msg> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expect").finish_non_exhaustive()
    }
}

impl<Msg: 'static> Expect<Msg> {
    /// Creates an expectation from a raw response handler.
    pub fn new<F>(handler: F) -> Self
    where
        F: FnOnce(RawResponse<Bytes>) -> Msg + Send + 'static,
    {
        Self {
            handler: Box::new(handler),
        }
    }

    /// Transform the produced message.
    #[must_use]
    pub fn map<F, Msg2>(self, f: F) -> Expect<Msg2>
    where
        F: FnOnce(Msg) -> Msg2 + Send + 'static,
        Msg2: 'static,
    {
        let handler = self.handler;
        Expect::new(move |raw| f(handler(raw)))
    }
}

impl<Msg> Expect<Msg> {
    /// Feed the transport response to the continuation.
    pub fn handle(self, raw: RawResponse<Bytes>) -> Msg {
        (self.handler)(raw)
    }
}

/// Expect a body decoded with `decoder`, shaped by `S`.
///
/// The transport body is first converted with [`FromBody`].
pub fn expect_with<S, B, D, Msg, F>(decoder: D, to_msg: F) -> Expect<Msg>
where
    B: FromBody + 'static,
    D: Decoder<B> + Send + 'static,
    S: Shape<B, D::Output> + 'static,
    F: FnOnce(Shaped<S, B, D::Output>) -> Msg + Send + 'static,
    Msg: 'static,
{
    Expect::new(move |raw: RawResponse<Bytes>| {
        let raw = raw.map_body(B::from_body);
        tracing::debug!(status = ?raw.status_code().ok(), "resolving response");
        to_msg(response_to::<S, _, _>(&decoder, raw))
    })
}

/// Expect a text body.
pub fn expect_string<S, Msg>(
    to_msg: impl FnOnce(Shaped<S, String, String>) -> Msg + Send + 'static,
) -> Expect<Msg>
where
    S: Shape<String, String> + 'static,
    Msg: 'static,
{
    expect_with::<S, String, _, _, _>(Text, to_msg)
}

/// Expect a JSON body deserialized into `T`.
pub fn expect_json<S, T, Msg>(
    to_msg: impl FnOnce(Shaped<S, String, T>) -> Msg + Send + 'static,
) -> Expect<Msg>
where
    T: serde::de::DeserializeOwned + 'static,
    S: Shape<String, T> + 'static,
    Msg: 'static,
{
    expect_with::<S, String, _, _, _>(Json::<T>::new(), to_msg)
}

/// Expect a binary body decoded with `decoder`.
pub fn expect_bytes<S, D, Msg>(
    decoder: D,
    to_msg: impl FnOnce(Shaped<S, Bytes, D::Output>) -> Msg + Send + 'static,
) -> Expect<Msg>
where
    D: Decoder<Bytes> + Send + 'static,
    S: Shape<Bytes, D::Output> + 'static,
    Msg: 'static,
{
    expect_with::<S, Bytes, _, _, _>(decoder, to_msg)
}

/// Expect any body; only the classification matters.
pub fn expect_whatever<S, Msg>(
    to_msg: impl FnOnce(Shaped<S, Bytes, ()>) -> Msg + Send + 'static,
) -> Expect<Msg>
where
    S: Shape<Bytes, ()> + 'static,
    Msg: 'static,
{
    expect_with::<S, Bytes, _, _, _>(Whatever, to_msg)
}
