//! Response classification and decoding for sift.
//!
//! This crate holds the pure part of sift, independent of any transport:
//! - [`RawResponse`] - the five possible outcomes of a transport attempt
//! - [`Metadata`] - URL, status and headers of a response
//! - [`Decoder`] - body decoders ([`Text`], [`Json`], [`Binary`], [`Whatever`], [`FromFn`])
//! - [`resolve`] - classify a response and decode its body
//! - [`Shape`] - present the result as [`Bare`], [`Tuple`] or [`Record`]
//! - [`DetailedError`] and [`Error`] - detailed and bare failure taxonomies
//! - [`list_to_query`] and [`list_to_headers`] - request helpers
//!
//! # Example
//!
//! ```
//! use sift_core::{DetailedError, Metadata, RawResponse, Tuple, response_to_json};
//!
//! let raw: RawResponse<String> =
//!     RawResponse::from_status(Metadata::new("https://x", 500), "err");
//!
//! let err = response_to_json::<Tuple, u32>(raw).unwrap_err();
//! assert!(matches!(err, DetailedError::BadStatus { ref body, .. } if body == "err"));
//! ```

mod accessor;
mod decode;
mod error;
mod metadata;
pub mod prelude;
mod query;
mod raw;
mod resolve;
mod shape;

pub use accessor::MissingMetadata;
pub use decode::{
    BYTES_DECODE_FAILURE, Binary, DecodeOutcome, Decoder, FromFn, Json, Text, Whatever, binary,
    from_fn, from_json,
};
pub use error::{DetailedError, Error, Result};
pub use metadata::Metadata;
pub use query::{list_to_headers, list_to_query};
pub use raw::RawResponse;
pub use resolve::resolve;
pub use shape::{
    Bare, Record, Shape, Shaped, Success, Tuple, response_to, response_to_bytes,
    response_to_json, response_to_string, response_to_whatever,
};

// Re-export http crate types for status codes
pub use http::StatusCode;
