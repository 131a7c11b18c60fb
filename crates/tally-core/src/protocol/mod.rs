//! Wire-level contracts for the visitor-count endpoint.
//!
//! - `counter`: success / error bodies and the tolerant count extraction the
//!   client relies on.
//! - `cors`: the cross-origin header set every response carries.

pub mod cors;
pub mod counter;
