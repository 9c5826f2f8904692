//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```ignore
//! use sift_core::prelude::*;
//! ```

pub use crate::{
    Bare, DecodeOutcome, Decoder, DetailedError, Error, Json, Metadata, RawResponse, Record,
    Result, Shape, Success, Text, Tuple, Whatever, binary, from_fn, resolve, response_to,
    response_to_bytes, response_to_json, response_to_string, response_to_whatever,
};
