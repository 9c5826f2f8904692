//! Result shapes.
//!
//! A [`Shape`] decides how the outcome of [`resolve`](crate::resolve) is
//! presented to callers:
//!
//! | Shape | Success | Failure |
//! |-------|---------|---------|
//! | [`Bare`] | `T` | [`Error`] (status code or reason only) |
//! | [`Tuple`] | `(Metadata, T)` | [`DetailedError<B>`] |
//! | [`Record`] | [`Success<T>`] | [`DetailedError<B>`] |
//!
//! The `response_to_*` functions pair a shape with a decoder family.
//!
//! # Example
//!
//! ```
//! use sift_core::{Bare, Metadata, RawResponse, Tuple, response_to_string};
//!
//! let raw: RawResponse<String> =
//!     RawResponse::from_status(Metadata::new("https://x", 200), "hello");
//!
//! assert_eq!(response_to_string::<Bare>(raw.clone()), Ok("hello".to_string()));
//!
//! let (metadata, body) = response_to_string::<Tuple>(raw).unwrap();
//! assert_eq!((metadata.status_code(), body.as_str()), (200, "hello"));
//! ```

use bytes::Bytes;

use crate::{DetailedError, Decoder, Error, Json, Metadata, RawResponse, Text, Whatever, resolve};

/// Presentation of a resolved response.
pub trait Shape<B, T> {
    /// Success payload.
    type Ok;
    /// Failure payload.
    type Error;

    /// Reshape the output of [`resolve`](crate::resolve).
    fn shape(
        resolved: Result<(Metadata, T), DetailedError<B>>,
    ) -> Result<Self::Ok, Self::Error>;
}

/// Result of shaping a response with `S`.
pub type Shaped<S, B, T> = Result<<S as Shape<B, T>>::Ok, <S as Shape<B, T>>::Error>;

/// Value only; failures lose metadata and body.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bare;

/// Metadata and value as a tuple; failures keep everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tuple;

/// Metadata and value as a [`Success`] record; failures keep everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Record;

/// Success payload of the [`Record`] shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Success<T> {
    /// Response metadata.
    pub metadata: Metadata,
    /// Decoded value.
    pub value: T,
}

impl<T> Success<T> {
    /// Transform the value with a function.
    pub fn map<F, U>(self, f: F) -> Success<U>
    where
        F: FnOnce(T) -> U,
    {
        Success {
            metadata: self.metadata,
            value: f(self.value),
        }
    }
}

impl<B, T> Shape<B, T> for Bare {
    type Ok = T;
    type Error = Error;

    fn shape(resolved: Result<(Metadata, T), DetailedError<B>>) -> Result<T, Error> {
        resolved.map(|(_, value)| value).map_err(Error::from)
    }
}

impl<B, T> Shape<B, T> for Tuple {
    type Ok = (Metadata, T);
    type Error = DetailedError<B>;

    fn shape(
        resolved: Result<(Metadata, T), DetailedError<B>>,
    ) -> Result<(Metadata, T), DetailedError<B>> {
        resolved
    }
}

impl<B, T> Shape<B, T> for Record {
    type Ok = Success<T>;
    type Error = DetailedError<B>;

    fn shape(
        resolved: Result<(Metadata, T), DetailedError<B>>,
    ) -> Result<Success<T>, DetailedError<B>> {
        resolved.map(|(metadata, value)| Success { metadata, value })
    }
}

// ============================================================================
// Response transforms
// ============================================================================

/// Resolve with any decoder and shape.
pub fn response_to<S, B, D>(decoder: &D, raw: RawResponse<B>) -> Shaped<S, B, D::Output>
where
    D: Decoder<B> + ?Sized,
    S: Shape<B, D::Output>,
{
    S::shape(resolve(decoder, raw))
}

/// The body as text.
pub fn response_to_string<S>(raw: RawResponse<String>) -> Shaped<S, String, String>
where
    S: Shape<String, String>,
{
    response_to::<S, _, _>(&Text, raw)
}

/// The body deserialized from JSON.
pub fn response_to_json<S, T>(raw: RawResponse<String>) -> Shaped<S, String, T>
where
    T: serde::de::DeserializeOwned,
    S: Shape<String, T>,
{
    response_to::<S, _, _>(&Json::<T>::new(), raw)
}

/// The body decoded from bytes, e.g. with [`binary`](crate::binary).
pub fn response_to_bytes<S, D>(decoder: &D, raw: RawResponse<Bytes>) -> Shaped<S, Bytes, D::Output>
where
    D: Decoder<Bytes> + ?Sized,
    S: Shape<Bytes, D::Output>,
{
    response_to::<S, _, _>(decoder, raw)
}

/// Only the classification; the body is ignored on success.
pub fn response_to_whatever<S, B>(raw: RawResponse<B>) -> Shaped<S, B, ()>
where
    S: Shape<B, ()>,
{
    response_to::<S, _, _>(&Whatever, raw)
}
