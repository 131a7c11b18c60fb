//! Counter storage backends.
//!
//! The only shared mutable state of the service lives behind `CounterStore`.
//! Every backend exposes a single atomic increment-and-return; there is no
//! get/put pair to compose, so handlers cannot reintroduce a lost-update race.

pub mod file;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use tally_core::error::Result;

use crate::config::{StorageBackend, StorageSection};

pub use file::FileStore;
pub use memory::MemoryStore;

/// Key-value backend holding the Counter Record.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Label used in logs and metrics (e.g. "memory").
    fn backend(&self) -> &'static str;

    /// Atomically add 1 to `key` (treating a missing row as 0) and return the
    /// new value.
    async fn increment(&self, key: &str) -> Result<u64>;
}

/// Build the backend named in config.
pub async fn from_config(cfg: &StorageSection) -> Result<Arc<dyn CounterStore>> {
    match cfg.backend {
        StorageBackend::Memory => Ok(Arc::new(MemoryStore::new())),
        StorageBackend::File => {
            let path = cfg.path.as_deref().unwrap_or_default();
            Ok(Arc::new(FileStore::open(path).await?))
        }
    }
}
