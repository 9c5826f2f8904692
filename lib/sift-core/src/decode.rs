//! Body decoders.
//!
//! A [`Decoder`] turns a response body into a value, or reports why it could
//! not. Decoders only run on responses with a good status.
//!
//! - [`Text`] - the body as-is
//! - [`Json`] - JSON through serde, with path-aware failure messages
//! - [`Binary`] - a user function over raw bytes
//! - [`Whatever`] - ignores the body
//! - [`FromFn`] - any closure over metadata and body

use std::fmt;
use std::marker::PhantomData;

use crate::Metadata;

/// Failure reason reported by [`Binary`] decoders.
pub const BYTES_DECODE_FAILURE: &str = "Error decoding bytes";

/// Result of decoding a body: the value, or a failure description.
pub type DecodeOutcome<T> = std::result::Result<T, String>;

/// Converts a response body into a typed value.
///
/// # Example
///
/// ```
/// use sift_core::{DecodeOutcome, Decoder, Metadata};
///
/// struct Length;
///
/// impl Decoder<String> for Length {
///     type Output = usize;
///
///     fn decode(&self, _metadata: &Metadata, body: &String) -> DecodeOutcome<usize> {
///         Ok(body.len())
///     }
/// }
/// ```
pub trait Decoder<B> {
    /// Decoded value type.
    type Output;

    /// Decode the body of a response.
    ///
    /// The error string is reported to callers verbatim.
    fn decode(&self, metadata: &Metadata, body: &B) -> DecodeOutcome<Self::Output>;
}

impl<B, D> Decoder<B> for &D
where
    D: Decoder<B> + ?Sized,
{
    type Output = D::Output;

    fn decode(&self, metadata: &Metadata, body: &B) -> DecodeOutcome<Self::Output> {
        (**self).decode(metadata, body)
    }
}

// ============================================================================
// Text
// ============================================================================

/// Returns the body unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Text;

impl<B: Clone> Decoder<B> for Text {
    type Output = B;

    fn decode(&self, _metadata: &Metadata, body: &B) -> DecodeOutcome<B> {
        Ok(body.clone())
    }
}

// ============================================================================
// Whatever
// ============================================================================

/// Accepts any body and yields `()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Whatever;

impl<B> Decoder<B> for Whatever {
    type Output = ();

    fn decode(&self, _metadata: &Metadata, _body: &B) -> DecodeOutcome<()> {
        Ok(())
    }
}

// ============================================================================
// JSON
// ============================================================================

/// Deserializes the body as JSON into `T`.
///
/// Failures at the document root carry `serde_json`'s message, e.g.
/// `expected value at line 1 column 1`. Failures below the root are prefixed
/// with the path, e.g. ``address: missing field `city` at line 1 column 13``.
pub struct Json<T> {
    target: PhantomData<fn() -> T>,
}

impl<T> Json<T> {
    /// Creates a JSON decoder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            target: PhantomData,
        }
    }
}

impl<T> Default for Json<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Json<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Json<T> {}

impl<T> fmt::Debug for Json<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Json")
            .field("target", &std::any::type_name::<T>())
            .finish()
    }
}

impl<B, T> Decoder<B> for Json<T>
where
    B: AsRef<[u8]>,
    T: serde::de::DeserializeOwned,
{
    type Output = T;

    fn decode(&self, _metadata: &Metadata, body: &B) -> DecodeOutcome<T> {
        from_json(body.as_ref())
    }
}

/// Deserialize JSON bytes, reporting failures with their path.
///
/// # Errors
///
/// Returns the failure message when deserialization fails.
///
/// # Example
///
/// ```
/// use sift_core::from_json;
/// use serde::Deserialize;
///
/// #[derive(Debug, Deserialize)]
/// struct User { name: String }
///
/// let err = from_json::<User>(br#"{"name":1}"#).unwrap_err();
/// assert_eq!(err, "name: invalid type: integer `1`, expected a string at line 1 column 9");
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> DecodeOutcome<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    let value: T =
        serde_path_to_error::deserialize(&mut deserializer).map_err(|e| e.to_string())?;
    // Trailing characters are a failure, as with `serde_json::from_slice`.
    deserializer.end().map_err(|e| e.to_string())?;
    Ok(value)
}

// ============================================================================
// Binary
// ============================================================================

/// Decodes raw bytes with a user function.
///
/// The function returns `None` when the bytes do not decode; the failure is
/// then reported as [`BYTES_DECODE_FAILURE`].
#[derive(Clone, Copy)]
pub struct Binary<F> {
    decode: F,
}

impl<F> fmt::Debug for Binary<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binary").finish_non_exhaustive()
    }
}

/// Creates a [`Binary`] decoder.
///
/// # Example
///
/// ```
/// use sift_core::{Decoder, Metadata, binary};
///
/// let first_byte = binary(|bytes: &[u8]| bytes.first().copied());
/// let metadata = Metadata::new("https://example.com", 200);
///
/// assert_eq!(first_byte.decode(&metadata, &b"\x2a".to_vec()), Ok(42));
/// assert_eq!(
///     first_byte.decode(&metadata, &Vec::new()),
///     Err("Error decoding bytes".to_string())
/// );
/// ```
pub const fn binary<F>(decode: F) -> Binary<F> {
    Binary { decode }
}

impl<B, F, T> Decoder<B> for Binary<F>
where
    B: AsRef<[u8]>,
    F: Fn(&[u8]) -> Option<T>,
{
    type Output = T;

    fn decode(&self, _metadata: &Metadata, body: &B) -> DecodeOutcome<T> {
        (self.decode)(body.as_ref()).ok_or_else(|| BYTES_DECODE_FAILURE.to_string())
    }
}

// ============================================================================
// Closure
// ============================================================================

/// Decoder built from a closure over metadata and body.
#[derive(Clone, Copy)]
pub struct FromFn<F> {
    decode: F,
}

impl<F> fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromFn").finish_non_exhaustive()
    }
}

/// Creates a decoder from a closure.
///
/// # Example
///
/// ```
/// use sift_core::{Decoder, Metadata, from_fn};
///
/// let etag = from_fn(|metadata: &Metadata, _body: &String| {
///     metadata
///         .header("etag")
///         .map(str::to_string)
///         .ok_or_else(|| "missing etag".to_string())
/// });
///
/// let metadata = Metadata::new("https://example.com", 200).with_header("etag", "v1");
/// assert_eq!(etag.decode(&metadata, &String::new()), Ok("v1".to_string()));
/// ```
pub const fn from_fn<F>(decode: F) -> FromFn<F> {
    FromFn { decode }
}

impl<B, F, T> Decoder<B> for FromFn<F>
where
    F: Fn(&Metadata, &B) -> DecodeOutcome<T>,
{
    type Output = T;

    fn decode(&self, metadata: &Metadata, body: &B) -> DecodeOutcome<T> {
        (self.decode)(metadata, body)
    }
}
