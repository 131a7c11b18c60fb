//! tally core: wire types and the error surface shared by the counter service
//! and its client.
//!
//! This crate carries no transport or runtime dependencies, so both the axum
//! service and the retrying client can agree on the JSON contract without
//! pulling each other's stacks in.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `TallyError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod config;
pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{Result, TallyError};
