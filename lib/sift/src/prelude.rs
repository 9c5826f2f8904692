//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```ignore
//! use sift::prelude::*;
//! ```

pub use crate::{
    Bare, DetailedError, Error, Expect, HyperTransport, Metadata, Method, RawResponse, Record,
    Request, RequestBuilder, Result, StatusCode, Success, Transport, TransportConfig, Tuple,
    expect_bytes, expect_json, expect_string, expect_whatever, mock,
};
pub use serde::{Deserialize, Serialize};
