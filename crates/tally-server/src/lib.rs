//! tally counter service library entry.
//!
//! Wires config, storage backends, the HTTP surface, ops endpoints and
//! metrics into an axum router. Consumed by the binary (`main.rs`) and by
//! integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod app_state;
pub mod config;
pub mod http;
pub mod obs;
pub mod ops;
pub mod router;
pub mod store;
