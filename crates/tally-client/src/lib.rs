//! tally client: fetch the visitor count with a per-attempt timeout and
//! bounded fixed-delay retry, then count up to it on a display surface.
//!
//! The flow is an explicit state machine (`machine`) driven by `fetcher`;
//! the network and the display sit behind `CountTransport` and
//! `DisplaySurface` so both can be swapped in tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod config;
pub mod display;
pub mod error;
pub mod fetcher;
pub mod machine;
pub mod transport;

pub use error::ClientError;
pub use fetcher::{CountFetcher, RetryPolicy};
pub use machine::{FetchEvent, FetchState};
