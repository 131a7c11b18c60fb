//! Top-level facade crate for tally.
//!
//! Re-exports the wire types, the counter service and the client so users can
//! depend on a single crate.

pub mod core {
    pub use tally_core::*;
}

pub mod server {
    pub use tally_server::*;
}

pub mod client {
    pub use tally_client::*;
}
