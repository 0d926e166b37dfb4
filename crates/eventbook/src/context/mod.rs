//! Request-scoped context module.
//!
//! Provides the `RequestContext` extractor that resolves the request's
//! credential once and bundles the result with the request id.

mod extractor;
mod types;

pub use types::{RequestContext, RequestId};
