//! Detailed HTTP responses for Rust.
//!
//! sift sends requests over a hyper transport that never fails: every
//! outcome is a [`RawResponse`]. An [`Expect`] then resolves that outcome
//! into a shaped result, keeping the status, headers and body of failed
//! responses when asked to.
//!
//! - [`Bare`] shape: `Result<T, Error>`, failures flattened
//! - [`Tuple`] shape: `Result<(Metadata, T), DetailedError<B>>`
//! - [`Record`] shape: `Result<Success<T>, DetailedError<B>>`
//!
//! # Example
//!
//! ```ignore
//! use sift::prelude::*;
//!
//! #[derive(Debug, Deserialize)]
//! pub struct User {
//!     id: u64,
//!     name: String,
//! }
//!
//! let transport = HyperTransport::new();
//! let request = Request::get("https://api.example.com/users/42").build();
//!
//! match transport.dispatch(request, expect_json::<Tuple, User, _>(|r| r)).await {
//!     Ok((metadata, user)) => println!("{} from {}", user.name, metadata.url()),
//!     Err(DetailedError::BadStatus { metadata, body }) => {
//!         eprintln!("{}: {body}", metadata.status_code());
//!     }
//!     Err(err) => eprintln!("{err}"),
//! }
//! ```
//!
//! Tests can swap a real expectation for one of the [`mock`] expectations,
//! which resolve a canned response whatever the server says.

mod config;
mod connector;
mod expect;
pub mod middleware;
pub mod mock;
pub mod prelude;
mod request;
mod transport;

pub use config::{TransportConfig, TransportConfigBuilder};
pub use expect::{
    Expect, FromBody, expect_bytes, expect_json, expect_string, expect_whatever, expect_with,
};
pub use request::{Request, RequestBuilder};
pub use transport::{
    BoxedService, HyperTransport, HyperTransportBuilder, ServiceFuture, Transport,
};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use sift_core::{
    BYTES_DECODE_FAILURE, Bare, Binary, DecodeOutcome, Decoder, DetailedError, Error, FromFn,
    Json, Metadata, MissingMetadata, RawResponse, Record, Result, Shape, Shaped, Success, Text,
    Tuple, Whatever, binary, from_fn, from_json, list_to_headers, list_to_query, resolve,
    response_to, response_to_bytes, response_to_json, response_to_string, response_to_whatever,
};

// Re-export http types for methods and status codes
pub use http::Method;
pub use sift_core::StatusCode;
