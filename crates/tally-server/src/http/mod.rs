//! HTTP surface of the counter service.
//!
//! - `counter`: increment + preflight handlers
//! - `cors`: middleware stamping the cross-origin headers on every response
//! - `error`: `TallyError` -> JSON error response

pub mod cors;
pub mod counter;
pub mod error;

pub use error::ApiError;
