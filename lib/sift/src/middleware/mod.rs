//! Tower middleware layers for the sift transport.
//!
//! Layers wrap the type-erased transport service, a
//! `Service<Request, Response = RawResponse<Bytes>, Error = Infallible>`.
//! Since the transport never fails, middleware observes or rewrites
//! [`RawResponse`](crate::RawResponse) outcomes rather than errors.
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `middleware-logging` | `.with_logging()` and `.with_debug_logging()` helpers |
//!
//! # Example
//!
//! ```ignore
//! use sift::HyperTransport;
//! use sift::middleware::LoggingLayer;
//!
//! let transport = HyperTransport::builder()
//!     .layer(LoggingLayer::debug())
//!     .build();
//! ```

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer};

// Re-export tower types for convenience
pub use tower::{Layer, ServiceBuilder};
