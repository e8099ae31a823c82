//! HTTP middleware for the API server.
//!
//! Layer order, outermost first: Sentry, `TraceLayer`, request id.

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
